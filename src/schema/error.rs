/// Errors raised while resolving the schema of a raw table file
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// I/O error reading the file head
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error in the marker or header line
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// The file ended before the column header line
    #[error("No column header line in {0}")]
    MissingHeader(String),

    /// The requested partition column is not in the header
    #[error("Partition column '{0}' not present in header")]
    MissingPartitionColumn(String),

    /// No partition column requested and no default candidate present
    #[error("No partition column given and header has neither TRADINGDATE nor SETTLEMENTDATE")]
    NoDefaultPartitionColumn,
}
