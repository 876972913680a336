use std::collections::HashMap;

use arrow::datatypes::{DataType, Schema as ArrowSchema};
use parquet::basic::{Compression, Encoding, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;

use super::token::TimestampTokenStyle;

/// Compression options for segment files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// ZSTD compression (recommended, best compression ratio)
    Zstd(i32),
    /// Snappy compression (faster, slightly larger files)
    Snappy,
    /// No compression (fastest write, largest files)
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        Self::Zstd(3)
    }
}

impl CompressionType {
    /// Maximum compression (slower write, smallest files)
    pub fn max_compression() -> Self {
        Self::Zstd(22)
    }

    /// Balanced compression (recommended default)
    pub fn balanced() -> Self {
        Self::Zstd(3)
    }

    /// Fast compression (faster write, larger files)
    pub fn fast() -> Self {
        Self::Snappy
    }
}

/// Configuration for the partition writer
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Compression type to use
    pub compression: CompressionType,

    /// Target row group size (number of rows per group)
    pub row_group_size: usize,

    /// Data page size in bytes
    pub data_page_size: usize,

    /// Whether to write statistics for columns
    pub write_statistics: bool,

    /// Dictionary page size limit in bytes
    pub dictionary_page_size_limit: usize,

    /// Enable BYTE_STREAM_SPLIT encoding for floating-point columns
    pub use_byte_stream_split: bool,

    /// How timestamp partition values are rendered in segment names
    pub timestamp_token: TimestampTokenStyle,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::balanced(),
            // A bid-per-offer trading day is a few hundred thousand rows
            row_group_size: 250_000,
            data_page_size: 1024 * 1024,
            write_statistics: true,
            dictionary_page_size_limit: 1024 * 1024,
            use_byte_stream_split: true,
            timestamp_token: TimestampTokenStyle::Auto,
        }
    }
}

impl WriterConfig {
    /// Configuration optimized for maximum compression (slower write)
    pub fn max_compression() -> Self {
        Self {
            compression: CompressionType::Zstd(22),
            row_group_size: 1_000_000,
            data_page_size: 2 * 1024 * 1024,
            dictionary_page_size_limit: 2 * 1024 * 1024,
            ..Self::default()
        }
    }

    /// Configuration optimized for fast writing (larger files)
    pub fn fast_write() -> Self {
        Self {
            compression: CompressionType::Snappy,
            row_group_size: 100_000,
            data_page_size: 512 * 1024,
            dictionary_page_size_limit: 512 * 1024,
            use_byte_stream_split: false,
            ..Self::default()
        }
    }

    /// Balanced configuration (default)
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Create writer properties for a segment of `schema` with footer `metadata`
    pub(crate) fn to_writer_properties(
        &self,
        schema: &ArrowSchema,
        metadata: &HashMap<String, String>,
    ) -> WriterProperties {
        let compression = match self.compression {
            CompressionType::Zstd(level) => {
                Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or_default())
            }
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
        };

        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut builder = WriterProperties::builder()
            .set_compression(compression)
            .set_data_page_size_limit(self.data_page_size)
            .set_dictionary_page_size_limit(self.dictionary_page_size_limit)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size);

        // String columns (DUID, BIDTYPE, descriptors) repeat heavily: dictionary + RLE.
        // Float columns are high cardinality: no dictionary, optionally BYTE_STREAM_SPLIT.
        for field in schema.fields() {
            let path = ColumnPath::new(vec![field.name().to_string()]);
            match field.data_type() {
                DataType::Utf8 => {
                    builder = builder.set_column_dictionary_enabled(path, true);
                }
                DataType::Float32 | DataType::Float64 => {
                    builder = builder.set_column_dictionary_enabled(path.clone(), false);
                    if self.use_byte_stream_split {
                        builder = builder.set_column_encoding(path, Encoding::BYTE_STREAM_SPLIT);
                    }
                }
                _ => {}
            }
        }

        let kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();

        builder = builder.set_key_value_metadata(Some(kv_metadata));

        builder.build()
    }
}
