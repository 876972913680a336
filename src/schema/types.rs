use std::fmt;
use std::str::FromStr;

use arrow::datatypes::{DataType, TimeUnit};
use serde::{Deserialize, Serialize};

/// Semantic type of a raw table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Stored verbatim
    Utf8,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// `YYYY/MM/DD HH:MM:SS` market time, stored without a time zone
    Timestamp,
}

impl ColumnType {
    /// Arrow type used for the in-memory batch and the Parquet segments
    pub fn arrow_type(&self) -> DataType {
        match self {
            ColumnType::Utf8 => DataType::Utf8,
            ColumnType::Float32 => DataType::Float32,
            ColumnType::Float64 => DataType::Float64,
            ColumnType::Timestamp => DataType::Timestamp(TimeUnit::Microsecond, None),
        }
    }

    /// Width of one value in memory, `None` for variable width columns
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            ColumnType::Utf8 => None,
            ColumnType::Float32 => Some(4),
            ColumnType::Float64 | ColumnType::Timestamp => Some(8),
        }
    }

    /// Lowercase name, as written to field metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Utf8 => "utf8",
            ColumnType::Float32 => "float32",
            ColumnType::Float64 => "float64",
            ColumnType::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utf8" | "string" | "str" => Ok(ColumnType::Utf8),
            "float32" | "f32" => Ok(ColumnType::Float32),
            "float64" | "f64" => Ok(ColumnType::Float64),
            "timestamp" | "datetime" => Ok(ColumnType::Timestamp),
            _ => Err(format!("Unknown column type '{}'", s)),
        }
    }
}

/// A named, typed column of a resolved schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Header cell text
    pub name: String,
    /// Parsing type
    pub column_type: ColumnType,
}

impl Column {
    /// Create a column
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}
