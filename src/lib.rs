//! # nempart - Partitioned Parquet for AEMO MMS Data Tables
//!
//! `nempart` streams the multi-gigabyte monthly CSV extracts published for the
//! National Electricity Market (e.g. `PUBLIC_DVD_BIDPEROFFER_*.CSV`) into a
//! directory of Parquet segment files, one set per value of a partition column.
//!
//! ## Key Features
//!
//! - **Bounded memory**: the input is read in batches of at most `chunk_size`
//!   rows; at most two batches are held at once.
//!
//! - **Typed columns**: bid-per-offer tables get their fixed Float32 / Float64 /
//!   Timestamp mapping; any other table passes through as strings.
//!
//! - **Append-only output**: segments are named `<token>-chunk-<NNN>.parquet`
//!   and a rerun into the same directory adds files with the next sequence
//!   numbers instead of replacing anything.
//!
//! - **Fail-fast**: the first malformed cell stops the conversion with the
//!   line, column and value that caused it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nempart::pipeline::Converter;
//!
//! let mut converter = Converter::new().with_chunk_size(500_000);
//! let stats = converter.convert(
//!     "PUBLIC_DVD_BIDPEROFFER_202107010000.CSV",
//!     "output/TRADINGDATE",
//! )?;
//! println!("{}", stats);
//! # Ok::<(), nempart::pipeline::ConversionError>(())
//! ```
//!
//! This creates a directory like:
//! ```text
//! output/TRADINGDATE/
//! ├── 20210701-chunk-001.parquet
//! ├── 20210701-chunk-002.parquet   # same day, next batch
//! ├── 20210702-chunk-001.parquet
//! └── ...
//! ```
//!
//! ## Reading Segments
//!
//! Segments are standard Parquet files:
//!
//! ```sql
//! -- DuckDB
//! SELECT DUID, SUM(MAXAVAIL) FROM read_parquet('output/TRADINGDATE/202107*.parquet')
//! GROUP BY DUID;
//! ```
//!
//! ## Architecture
//!
//! - [`schema`]: header reading, table kind detection, column types
//! - [`reader`]: chunked CSV reader and row size estimate
//! - [`writer`]: partition writer, segment naming and sequencing
//! - [`pipeline`]: the conversion state machine tying reader and writer together
//! - [`metadata`]: provenance stored in segment footers
//! - [`validator`]: checks an output directory against the naming and content rules

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod metadata;
pub mod pipeline;
pub mod reader;
pub mod schema;
pub mod validator;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::metadata::{SegmentMetadata, SourceFileInfo};
    pub use crate::pipeline::{
        ConversionConfig, ConversionError, ConversionStats, Converter, ErrorKind, PipelineState,
    };
    pub use crate::reader::{ChunkedReader, ReadError, ReaderConfig, RowBatch, SizeEstimate};
    pub use crate::schema::{read_header, ColumnType, Schema, SchemaError, TableKind};
    pub use crate::validator::{validate_partition_dir, ValidationReport};
    pub use crate::writer::{
        CompressionType, PartitionWriter, SegmentInfo, TimestampTokenStyle, WriterConfig,
        WriterError,
    };
}
