//! TOML configuration file support for power users.
//!
//! Instead of passing many CLI flags, users can specify settings in a config file:
//!
//! ```toml
//! # nempart.toml
//! [conversion]
//! chunk_size = 500000
//! partition_column = "TRADINGDATE"
//! compression_level = 15
//! row_group_size = 200000
//! null_markers = ["-"]
//! timestamp_token = "date"
//! ```
//!
//! CLI flags override the file; the file overrides the profile.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use nempart::writer::TimestampTokenStyle;

/// Root configuration structure for nempart.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Conversion-specific settings.
    #[serde(default)]
    pub conversion: ConversionConfig,
}

/// Configuration for the convert and batch commands.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionConfig {
    /// Rows read per batch.
    pub chunk_size: Option<usize>,

    /// Column whose values partition the output.
    pub partition_column: Option<String>,

    /// ZSTD compression level (1-22).
    pub compression_level: Option<i32>,

    /// Rows per Parquet row group.
    pub row_group_size: Option<usize>,

    /// Cell values read as null in addition to empty cells.
    pub null_markers: Option<Vec<String>>,

    /// Rendering of timestamp partition values in file names.
    pub timestamp_token: Option<TimestampTokenStyle>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [conversion]
            chunk_size = 500000
            partition_column = "SETTLEMENTDATE"
            compression_level = 15
            row_group_size = 200000
            null_markers = ["-", "NA"]
            timestamp_token = "datetime"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.conversion.chunk_size, Some(500_000));
        assert_eq!(config.conversion.partition_column.as_deref(), Some("SETTLEMENTDATE"));
        assert_eq!(config.conversion.compression_level, Some(15));
        assert_eq!(config.conversion.row_group_size, Some(200_000));
        assert_eq!(
            config.conversion.null_markers,
            Some(vec!["-".to_string(), "NA".to_string()])
        );
        assert_eq!(
            config.conversion.timestamp_token,
            Some(TimestampTokenStyle::DateTime)
        );
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [conversion]
            compression_level = 10
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.conversion.compression_level, Some(10));
        assert_eq!(config.conversion.row_group_size, None);
        assert!(config.conversion.null_markers.is_none());
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.conversion.chunk_size, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_str("[conversion]\nbatch_size = 10\n").is_err());
    }
}
