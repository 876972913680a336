//! # Raw Table Schema Resolution
//!
//! Turns the header of an MMS data table CSV into a [`Schema`]: the ordered
//! column list and, for table kinds with a fixed mapping, the parsing type of
//! each column.
//!
//! ## Raw File Layout
//!
//! ```text
//! C,NEMP.WORLD,BIDPEROFFER,AEMO,PUBLIC,2021/08/01,...      <- marker (skipped)
//! I,BIDS,BIDOFFERPERIOD,1,DUID,BIDTYPE,TRADINGDATE,...     <- header
//! D,BIDS,BIDOFFERPERIOD,1,ADPBA1G,ENERGY,2021/07/07 ...    <- data rows
//! C,"END OF REPORT",1051206                                <- trailer
//! ```
//!
//! ## Bid-per-offer Types
//!
//! | Column | Type |
//! |--------|------|
//! | TRADINGDATE, OFFERDATETIME | Timestamp |
//! | 1, PERIODID, MAXAVAIL, FIXEDLOAD | Float32 |
//! | ENABLEMENTMIN/MAX, LOW/HIGHBREAKPOINT, BANDAVAIL1-10 | Float32 |
//! | RAMPUPRATE, RAMPDOWNRATE, PASAAVAILABILITY | Float64 |
//! | everything else | Utf8 |
//!
//! Any other table kind resolves to [`Schema::Untyped`].

/// Column name constants.
pub mod columns;
mod constants;
mod error;
mod header;
mod resolve;
mod table_kind;
mod types;


pub use constants::*;
pub use error::SchemaError;
pub use header::{read_header, read_header_from};
pub use resolve::Schema;
pub use table_kind::TableKind;
pub use types::{Column, ColumnType};
