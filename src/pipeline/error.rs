use crate::metadata::MetadataError;
use crate::reader::ReadError;
use crate::schema::SchemaError;
use crate::writer::WriterError;

/// Broad category of a conversion failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input path, missing header or partition column, invalid settings
    Configuration,
    /// A row or cell the converter cannot accept
    Data,
    /// Filesystem failure reading the input or writing segments
    Io,
}

/// Errors that can occur during conversion
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The input path cannot be converted
    #[error("Invalid input {path}: {reason}")]
    InvalidInput {
        /// Input path as given
        path: String,
        /// What is wrong with it
        reason: String,
    },

    /// Error resolving the schema from the header
    #[error("Schema error: {0}")]
    SchemaError(#[from] SchemaError),

    /// Error streaming the raw table
    #[error("Read error: {0}")]
    ReadError(#[from] ReadError),

    /// Error writing a segment
    #[error("Writer error: {0}")]
    WriterError(#[from] WriterError),

    /// A data row has no value in the partition column
    #[error("Line {line}: {column} is empty")]
    NullPartitionValue {
        /// 1-based physical line number
        line: u64,
        /// Partition column name
        column: String,
    },

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error processing metadata
    #[error("Metadata error: {0}")]
    MetadataError(#[from] MetadataError),
}

impl ConversionError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::InvalidInput { .. } => ErrorKind::Configuration,
            ConversionError::NullPartitionValue { .. } => ErrorKind::Data,
            ConversionError::IoError(_) | ConversionError::MetadataError(_) => ErrorKind::Io,
            ConversionError::SchemaError(e) => match e {
                SchemaError::IoError(_) => ErrorKind::Io,
                SchemaError::CsvError(e) if e.is_io_error() => ErrorKind::Io,
                SchemaError::CsvError(_) => ErrorKind::Data,
                _ => ErrorKind::Configuration,
            },
            ConversionError::ReadError(e) => match e {
                _ if e.is_data_error() => ErrorKind::Data,
                ReadError::IoError(_) => ErrorKind::Io,
                ReadError::CsvError(e) if e.is_io_error() => ErrorKind::Io,
                ReadError::CsvError(_) | ReadError::ArrowError(_) => ErrorKind::Data,
                _ => ErrorKind::Configuration,
            },
            ConversionError::WriterError(e) => match e {
                _ if e.is_data_error() => ErrorKind::Data,
                WriterError::InvalidData(_) => ErrorKind::Configuration,
                _ => ErrorKind::Io,
            },
        }
    }
}
