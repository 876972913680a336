/// Errors that can occur during metadata processing
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// I/O error inspecting the source file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A required footer key is absent
    #[error("Missing metadata key: {0}")]
    MissingKey(String),

    /// A footer value could not be interpreted
    #[error("Invalid metadata value for {key}: {value}")]
    InvalidValue {
        /// Footer key
        key: String,
        /// Offending value
        value: String,
    },
}
