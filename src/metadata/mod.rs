//! # Segment Metadata
//!
//! Provenance embedded in the footer `key_value_metadata` of every segment
//! file, so a segment can be traced back to the raw table it came from
//! without any side-car files.
//!
//! | Key | Value |
//! |-----|-------|
//! | `nempart:format_version` | segment format version |
//! | `nempart:conversion_timestamp` | RFC 3339 time of writing |
//! | `nempart:converter_info` | `nempart vX.Y.Z` |
//! | `nempart:table_kind` | `BIDPEROFFER` or `UNRECOGNIZED` |
//! | `nempart:partition_column` | partition column name |
//! | `nempart:partition_token` | token of this segment |
//! | `nempart:source_file` | JSON [`SourceFileInfo`] |

mod error;
mod segment;
mod source;

#[cfg(test)]
mod tests;

pub use error::MetadataError;
pub use segment::SegmentMetadata;
pub use source::SourceFileInfo;
