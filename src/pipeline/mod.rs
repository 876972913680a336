//! # Conversion Pipeline
//!
//! Drives one raw table file through the reader and the partition writer.
//!
//! ```text
//! file -> read_header -> Schema (once)
//!      -> ChunkedReader -> BatchLag (one batch held back) -> PartitionWriter
//!                                     \-> last batch: strip_trailer -> PartitionWriter
//! ```
//!
//! The pipeline is a [`PipelineState`] machine. Peak memory is two batches:
//! the batch being read and the one held back. The first error aborts the
//! conversion; segments already written stay on disk.

mod convert;
mod error;
mod lag;
mod progress;
mod state;
mod stats;


pub use error::{ConversionError, ErrorKind};
pub use lag::{strip_trailer, BatchLag};
pub use progress::ProgressReporter;
pub use state::PipelineState;
pub use stats::ConversionStats;

use crate::reader::{ReaderConfig, DEFAULT_CHUNK_SIZE, DEFAULT_SAMPLE_ROWS};
use crate::writer::WriterConfig;

/// Configuration for converting one raw table file
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Reader configuration (chunk size, null markers)
    pub reader_config: ReaderConfig,

    /// Writer configuration (compression, token style)
    pub writer_config: WriterConfig,

    /// Partition column; `None` picks TRADINGDATE, then SETTLEMENTDATE
    pub partition_column: Option<String>,

    /// Rows sampled for the size estimate (0 disables progress reporting)
    pub sample_rows: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            reader_config: ReaderConfig::default(),
            writer_config: WriterConfig::default(),
            partition_column: None,
            sample_rows: DEFAULT_SAMPLE_ROWS,
        }
    }
}

impl ConversionConfig {
    /// Configuration optimized for maximum compression (slower conversion).
    ///
    /// Batches are twice the default so each segment spans more rows.
    pub fn max_compression() -> Self {
        Self {
            reader_config: ReaderConfig::with_chunk_size(2 * DEFAULT_CHUNK_SIZE),
            writer_config: WriterConfig::max_compression(),
            ..Self::default()
        }
    }

    /// Configuration optimized for fast conversion (larger files, half-size batches)
    pub fn fast_write() -> Self {
        Self {
            reader_config: ReaderConfig::with_chunk_size(DEFAULT_CHUNK_SIZE / 2),
            writer_config: WriterConfig::fast_write(),
            ..Self::default()
        }
    }

    /// Balanced configuration (default)
    pub fn balanced() -> Self {
        Self::default()
    }
}

/// Converts raw table files into partitioned segment directories
pub struct Converter {
    config: ConversionConfig,
    state: PipelineState,
}

impl Converter {
    /// Create a new converter with default configuration
    pub fn new() -> Self {
        Self::with_config(ConversionConfig::default())
    }

    /// Create a new converter with custom configuration
    pub fn with_config(config: ConversionConfig) -> Self {
        Self {
            config,
            state: PipelineState::Idle,
        }
    }

    /// Set the number of rows per batch
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.reader_config.chunk_size = chunk_size;
        self
    }

    /// Set the partition column
    pub fn with_partition_column(mut self, column: &str) -> Self {
        self.config.partition_column = Some(column.to_string());
        self
    }

    /// Current configuration
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Stage reached by the last or current conversion
    pub fn state(&self) -> PipelineState {
        self.state
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}
