use crate::schema::ColumnType;

/// Errors that can occur while streaming a raw table file
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed CSV (unbalanced quotes, invalid UTF-8, ...)
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Arrow error assembling a batch
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Reader configuration rejected
    #[error("Invalid reader configuration: {0}")]
    InvalidConfig(String),

    /// The file ended before the column header line
    #[error("No column header line")]
    MissingHeader,

    /// Header width differs from the resolved schema
    #[error("Header has {found} columns, schema has {expected}")]
    SchemaMismatch {
        /// Columns in the header line
        found: usize,
        /// Columns in the schema
        expected: usize,
    },

    /// A cell does not parse as its column's declared type
    #[error("Line {line}, column '{column}': cannot parse '{value}' as {expected}")]
    InvalidCell {
        /// 1-based physical line number
        line: u64,
        /// Column name
        column: String,
        /// Raw cell text
        value: String,
        /// Declared column type
        expected: ColumnType,
    },

    /// A row has more cells than the header
    #[error("Line {line}: {found} fields, header has {expected}")]
    TooManyFields {
        /// 1-based physical line number
        line: u64,
        /// Cells in the row
        found: usize,
        /// Cells in the header
        expected: usize,
    },
}

impl ReadError {
    /// Whether this error is caused by the content of a data row
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            ReadError::InvalidCell { .. } | ReadError::TooManyFields { .. }
        )
    }
}
