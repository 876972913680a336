//! # Partition Writer Module
//!
//! Writes batches of parsed rows as Parquet segment files partitioned by the
//! exact value of one column.
//!
//! ## Design Principles
//!
//! 1. **One segment per value per batch**: a batch holding rows for three
//!    trading dates produces three files; a later batch with the same dates
//!    produces three more with the next sequence numbers.
//!
//! 2. **Append-only**: segment names are `<token>-chunk-<NNN>.parquet` with
//!    `NNN` one past the highest existing suffix, so reruns into the same
//!    directory add files and never replace them.
//!
//! 3. **Self-contained files**: provenance is embedded in each footer's
//!    key_value_metadata (see [`crate::metadata`]).
//!
//! 4. **Configurable compression**: ZSTD (default), Snappy, or uncompressed.

mod config;
mod error;
mod partition_writer;
mod sequence;
mod stats;
mod token;

#[cfg(test)]
mod tests;

pub use config::{CompressionType, WriterConfig};
pub use error::WriterError;
pub use partition_writer::{PartitionWriter, SegmentInfo};
pub use sequence::{
    next_sequence, parse_sequence, scan_sequence, segment_file_name, split_segment_name,
};
pub use stats::WriterStats;
pub use token::{partition_token, PartitionKey, TimestampTokenStyle};
