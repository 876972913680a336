//! Conversion profiles selectable with `--profile`.
//!
//! A profile picks one of the [`ConversionConfig`] presets, so batch size,
//! compression and row group layout move together. The config file and
//! individual flags are applied on top of it.

use clap::ValueEnum;

use nempart::pipeline::ConversionConfig;

/// Preset trading conversion speed against segment size.
///
/// | Profile | Compression | Row group | Rows per batch |
/// |---|---|---|---|
/// | `fast` | Snappy, no byte-stream split | 100,000 | 500,000 |
/// | `balanced` | ZSTD 3 | 250,000 | 1,000,000 |
/// | `max-compression` | ZSTD 22 | 1,000,000 | 2,000,000 |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// Prioritize speed over segment size
    Fast,
    /// Balance between speed and segment size
    #[default]
    Balanced,
    /// Smallest segments, slower conversion and larger batches
    MaxCompression,
}

impl Profile {
    /// Base configuration for this profile
    pub fn conversion_config(&self) -> ConversionConfig {
        match self {
            Profile::Fast => ConversionConfig::fast_write(),
            Profile::Balanced => ConversionConfig::balanced(),
            Profile::MaxCompression => ConversionConfig::max_compression(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nempart::writer::CompressionType;

    #[test]
    fn test_profiles_select_presets() {
        let fast = Profile::Fast.conversion_config();
        assert_eq!(fast.writer_config.compression, CompressionType::Snappy);
        assert!(!fast.writer_config.use_byte_stream_split);
        assert_eq!(fast.reader_config.chunk_size, 500_000);

        let balanced = Profile::default().conversion_config();
        assert_eq!(balanced.writer_config.compression, CompressionType::Zstd(3));
        assert_eq!(balanced.reader_config.chunk_size, 1_000_000);

        let max = Profile::MaxCompression.conversion_config();
        assert_eq!(max.writer_config.compression, CompressionType::Zstd(22));
        assert_eq!(max.writer_config.row_group_size, 1_000_000);
        assert_eq!(max.reader_config.chunk_size, 2_000_000);
    }

    #[test]
    fn test_profile_names() {
        assert_eq!(Profile::from_str("fast", true).unwrap(), Profile::Fast);
        assert_eq!(
            Profile::from_str("max-compression", true).unwrap(),
            Profile::MaxCompression
        );
        assert!(Profile::from_str("max", true).is_err());
    }
}
