use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use nempart::pipeline::ConversionConfig;
use nempart::writer::{CompressionType, TimestampTokenStyle};

mod batch;
mod convert;
mod info;
mod validate;

mod config;
mod profile;

pub use config::Config;
pub use profile::Profile;

/// nempart - Partition AEMO MMS data tables into Parquet segments
#[derive(Parser)]
#[command(name = "nempart")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Tuning flags shared by `convert` and `batch`
#[derive(Args, Debug, Default)]
pub struct TuningArgs {
    /// Conversion profile
    #[arg(short = 'p', long, default_value = "balanced", value_enum)]
    profile: Profile,

    /// Path to TOML config file (overrides profile, CLI flags override config)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Rows read per batch (bounds memory)
    #[arg(short = 'n', long, value_name = "ROWS")]
    chunk_size: Option<usize>,

    /// Cell value read as null (repeatable), e.g. --null-marker=-
    #[arg(long = "null-marker", value_name = "VALUE", allow_hyphen_values = true)]
    null_markers: Vec<String>,

    /// Timestamp rendering in segment names: auto, date or datetime
    #[arg(long, value_name = "STYLE")]
    timestamp_token: Option<TimestampTokenStyle>,

    // === Advanced tuning flags (hidden from --help) ===
    /// Override ZSTD compression level (1-22)
    #[arg(short = 'c', long, hide = true)]
    compression_level: Option<i32>,

    /// Override Parquet row group size
    #[arg(short = 'r', long, hide = true)]
    row_group_size: Option<usize>,
}

impl TuningArgs {
    /// Resolve the conversion settings: CLI flag > config file > profile
    fn to_conversion_config(&self, partition_column: Option<String>) -> Result<ConversionConfig> {
        let file = match &self.config {
            Some(path) => {
                info!("Loading config from: {}", path.display());
                Config::from_file(path)?
            }
            None => Config::default(),
        };
        self.merge(file, partition_column)
    }

    fn merge(&self, file: Config, partition_column: Option<String>) -> Result<ConversionConfig> {
        let mut config = self.profile.conversion_config();
        let file = file.conversion;

        // An explicit level switches any profile to ZSTD at that level
        if let Some(level) = self.compression_level.or(file.compression_level) {
            if !(1..=22).contains(&level) {
                anyhow::bail!("Compression level must be between 1 and 22, got {}", level);
            }
            config.writer_config.compression = CompressionType::Zstd(level);
        }

        if let Some(chunk_size) = self.chunk_size.or(file.chunk_size) {
            config.reader_config.chunk_size = chunk_size;
        }
        if config.reader_config.chunk_size == 0 {
            anyhow::bail!("Chunk size must be at least 1");
        }

        if !self.null_markers.is_empty() {
            config.reader_config.null_markers = self.null_markers.clone();
        } else if let Some(markers) = file.null_markers {
            config.reader_config.null_markers = markers;
        }

        if let Some(rows) = self.row_group_size.or(file.row_group_size) {
            config.writer_config.row_group_size = rows;
        }
        if let Some(style) = self.timestamp_token.or(file.timestamp_token) {
            config.writer_config.timestamp_token = style;
        }
        config.partition_column = partition_column.or(file.partition_column);

        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one raw table CSV into partitioned Parquet segments
    Convert {
        /// Input MMS table (.csv / .CSV)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory receiving the segment files (created if missing)
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Partition column (default: TRADINGDATE, else SETTLEMENTDATE)
        #[arg(short = 'k', long, value_name = "COLUMN")]
        partition_column: Option<String>,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Convert every raw table in a directory, one after another
    Batch {
        /// Directory holding the raw tables
        #[arg(value_name = "INPUT_DIR")]
        input_dir: PathBuf,

        /// Root directory; segments go to OUTPUT_DIR/<PARTITION_COLUMN>/
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// File name pattern of the raw tables (matched case-insensitively)
        #[arg(long, default_value = "*.csv")]
        pattern: String,

        /// Delete each input file after it converted successfully
        #[arg(long)]
        delete_input: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Show header, table kind, column types and size estimate of a raw table
    Info {
        /// Input MMS table
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Validate a directory of segment files
    Validate {
        /// Directory written by `convert`
        #[arg(value_name = "OUTPUT_DIR")]
        dir: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            input,
            output_dir,
            partition_column,
            tuning,
        } => convert::run(input, output_dir, tuning.to_conversion_config(partition_column)?),
        Commands::Batch {
            input_dir,
            output_dir,
            pattern,
            delete_input,
            tuning,
        } => batch::run(
            input_dir,
            output_dir,
            &pattern,
            delete_input,
            tuning.to_conversion_config(None)?,
        ),
        Commands::Info { input } => info::run(input),
        Commands::Validate { dir } => validate::run(dir),
    }
}
