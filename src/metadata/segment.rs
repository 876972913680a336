use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::schema::TableKind;

use super::source::SourceFileInfo;
use super::MetadataError;

/// Provenance written to the footer of every segment file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentMetadata {
    /// Table kind detected for the source file
    pub table_kind: TableKind,

    /// Name of the partition column
    pub partition_column: String,

    /// Partition token of this segment (set per segment by the writer)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_token: Option<String>,

    /// Source file information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<SourceFileInfo>,
}

impl SegmentMetadata {
    /// Metadata for segments of `partition_column` from a table of `table_kind`
    pub fn new(table_kind: TableKind, partition_column: &str) -> Self {
        Self {
            table_kind,
            partition_column: partition_column.to_string(),
            partition_token: None,
            source_file: None,
        }
    }

    /// Attach source file information
    pub fn with_source_file(mut self, source: SourceFileInfo) -> Self {
        self.source_file = Some(source);
        self
    }

    /// Copy of this metadata for the segment of `token`
    pub fn for_token(&self, token: &str) -> Self {
        Self {
            partition_token: Some(token.to_string()),
            ..self.clone()
        }
    }

    /// Convert to a HashMap suitable for Parquet key_value_metadata
    pub fn to_parquet_metadata(&self) -> Result<HashMap<String, String>, MetadataError> {
        use crate::schema::*;

        let mut metadata = HashMap::new();

        metadata.insert(KEY_FORMAT_VERSION.to_string(), NEMPART_FORMAT_VERSION.to_string());

        metadata.insert(
            KEY_CONVERSION_TIMESTAMP.to_string(),
            chrono::Utc::now().to_rfc3339(),
        );

        metadata.insert(
            KEY_CONVERTER_INFO.to_string(),
            format!("nempart v{}", env!("CARGO_PKG_VERSION")),
        );

        metadata.insert(KEY_TABLE_KIND.to_string(), self.table_kind.as_str().to_string());
        metadata.insert(KEY_PARTITION_COLUMN.to_string(), self.partition_column.clone());

        if let Some(ref token) = self.partition_token {
            metadata.insert(KEY_PARTITION_TOKEN.to_string(), token.clone());
        }

        if let Some(ref source) = self.source_file {
            metadata.insert(KEY_SOURCE_FILE.to_string(), source.to_json()?);
        }

        Ok(metadata)
    }

    /// Reconstruct metadata from Parquet key_value_metadata
    pub fn from_parquet_metadata(
        metadata: &HashMap<String, String>,
    ) -> Result<Self, MetadataError> {
        use crate::schema::*;

        let table_kind = match required(metadata, KEY_TABLE_KIND)? {
            "BIDPEROFFER" => TableKind::BidPerOffer,
            "UNRECOGNIZED" => TableKind::Unrecognized,
            other => {
                return Err(MetadataError::InvalidValue {
                    key: KEY_TABLE_KIND.to_string(),
                    value: other.to_string(),
                })
            }
        };

        let mut result = Self::new(table_kind, required(metadata, KEY_PARTITION_COLUMN)?);
        result.partition_token = metadata.get(KEY_PARTITION_TOKEN).cloned();

        if let Some(json) = metadata.get(KEY_SOURCE_FILE) {
            result.source_file = Some(SourceFileInfo::from_json(json)?);
        }

        Ok(result)
    }
}

fn required<'a>(metadata: &'a HashMap<String, String>, key: &str) -> Result<&'a str, MetadataError> {
    metadata
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| MetadataError::MissingKey(key.to_string()))
}
