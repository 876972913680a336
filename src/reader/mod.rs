//! # Raw Table Reader Module
//!
//! Streams MMS data table CSVs as bounded, typed Arrow batches.
//!
//! ## File Layout
//!
//! ```text
//! C,NEMP.WORLD,BIDPEROFFER,AEMO,PUBLIC,2021/07/31,...   <- marker (skipped)
//! I,BIDS,BIDOFFERPERIOD,1,DUID,BIDTYPE,TRADINGDATE,...  <- header (skipped)
//! D,BIDS,BIDOFFERPERIOD,1,AGLHAL,ENERGY,2021/07/07 ...  <- data rows
//! C,"END OF REPORT",1234567                             <- trailer (a data row here)
//! ```
//!
//! The reader does not know about the trailer. It is the last row of the
//! last batch and is removed by the pipeline.
//!
//! ## Cell Rules
//!
//! | Cell | Result |
//! |------|--------|
//! | empty / whitespace | null |
//! | configured null marker | null |
//! | float column | parsed, else [`ReadError::InvalidCell`] |
//! | timestamp column | `YYYY/MM/DD HH:MM:SS` or `YYYY/MM/DD`, else [`ReadError::InvalidCell`] |
//! | string column | verbatim |
//!
//! Rows shorter than the header are padded with nulls; longer rows are
//! rejected with [`ReadError::TooManyFields`].

mod batch;
mod cell;
mod chunked;
mod config;
mod error;
mod estimate;

#[cfg(test)]
mod tests;

pub use batch::RowBatch;
pub use cell::{parse_timestamp, timestamp_micros};
pub use chunked::ChunkedReader;
pub use config::{ReaderConfig, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
pub use error::ReadError;
pub use estimate::{estimate_row_size, estimate_row_size_from, SizeEstimate, DEFAULT_SAMPLE_ROWS};
