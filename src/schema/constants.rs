/// nempart segment format version - follows semantic versioning
pub const NEMPART_FORMAT_VERSION: &str = "1.0.0";

/// File extension of segment files (without the dot)
pub const SEGMENT_EXTENSION: &str = "parquet";

/// Separator between partition token and sequence number in segment names
pub const SEGMENT_INFIX: &str = "-chunk-";

/// Minimum number of digits of a segment sequence number
pub const SEQUENCE_WIDTH: usize = 3;

/// Extension expected on raw input tables (compared case-insensitively)
pub const INPUT_EXTENSION: &str = "csv";

/// Timestamp layout used by MMS tables
pub const MMS_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Date-only layout accepted in timestamp columns (midnight)
pub const MMS_DATE_FORMAT: &str = "%Y/%m/%d";

/// Field metadata key recording the MMS column type
pub const FIELD_MMS_TYPE: &str = "mms_type";

/// Metadata key for format version in Parquet footer
pub const KEY_FORMAT_VERSION: &str = "nempart:format_version";

/// Metadata key for source file information
pub const KEY_SOURCE_FILE: &str = "nempart:source_file";

/// Metadata key for the detected table kind
pub const KEY_TABLE_KIND: &str = "nempart:table_kind";

/// Metadata key for the partition column name
pub const KEY_PARTITION_COLUMN: &str = "nempart:partition_column";

/// Metadata key for the partition token of the segment
pub const KEY_PARTITION_TOKEN: &str = "nempart:partition_token";

/// Metadata key for conversion timestamp
pub const KEY_CONVERSION_TIMESTAMP: &str = "nempart:conversion_timestamp";

/// Metadata key for converter software info
pub const KEY_CONVERTER_INFO: &str = "nempart:converter_info";
