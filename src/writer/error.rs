use std::path::PathBuf;

/// Errors that can occur during writing
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the Arrow library during array operations
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Error from the Parquet library during file writing
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Error processing metadata
    #[error("Metadata error: {0}")]
    MetadataError(#[from] crate::metadata::MetadataError),

    /// Segment directory could not be listed
    #[error("Invalid segment scan pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    /// A directory entry could not be read during a segment scan
    #[error("Segment scan error: {0}")]
    GlobError(#[from] glob::GlobError),

    /// Invalid data provided to the writer
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A row has no value in the partition column
    #[error("Row {row} of batch has a null {column}")]
    NullPartitionValue {
        /// Partition column name
        column: String,
        /// Row index within the batch
        row: usize,
    },

    /// A partition value does not produce a usable file name
    #[error("Partition value {0:?} does not yield a valid segment name")]
    InvalidPartitionToken(String),

    /// A segment file appeared under the chosen name before it was persisted
    #[error("Segment already exists: {}", .0.display())]
    SegmentExists(PathBuf),
}

impl WriterError {
    /// Whether this error is caused by the content of the rows being written
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            WriterError::NullPartitionValue { .. } | WriterError::InvalidPartitionToken(_)
        )
    }
}
