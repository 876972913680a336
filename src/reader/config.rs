/// Default number of rows per batch
pub const DEFAULT_CHUNK_SIZE: usize = 1_000_000;

/// Largest accepted chunk size; rows within a batch are addressed with `u32`
pub const MAX_CHUNK_SIZE: usize = u32::MAX as usize;

/// Configuration for streaming raw table files
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Maximum number of rows per batch
    pub chunk_size: usize,

    /// Cell values read as null in addition to empty cells (e.g. `"-"`)
    pub null_markers: Vec<String>,

    /// Size of the CSV reader's input buffer in bytes
    pub input_buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            null_markers: Vec::new(),
            // 64KB is a good default for sequential I/O
            input_buffer_size: 64 * 1024,
        }
    }
}

impl ReaderConfig {
    /// Config with the given chunk size and defaults otherwise
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            ..Default::default()
        }
    }

    /// Whether a raw cell is read as null
    pub fn is_null(&self, cell: &str) -> bool {
        let cell = cell.trim();
        cell.is_empty() || self.null_markers.iter().any(|marker| marker == cell)
    }
}
