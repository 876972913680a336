//! # nempart
//!
//! A command-line tool that streams AEMO MMS data table CSVs into
//! Parquet segment files partitioned by one column.
//!
//! ## Usage
//!
//! ```bash
//! # Partition a bid-per-offer table by trading date
//! nempart convert PUBLIC_DVD_BIDPEROFFER_202107010000.CSV output/
//!
//! # Convert a whole download directory into output/<PARTITION_COLUMN>/
//! nempart batch downloads/ output/ --delete-input
//!
//! # Check an output directory
//! nempart validate output/TRADINGDATE
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
