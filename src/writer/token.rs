use std::fmt;
use std::str::FromStr;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, TimeUnit, TimestampMicrosecondType};
use chrono::{DateTime, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::reader::parse_timestamp;

use super::error::WriterError;

const DATE_TOKEN_FORMAT: &str = "%Y%m%d";
const DATETIME_TOKEN_FORMAT: &str = "%Y%m%d%H%M%S";

/// How timestamp partition values are rendered as tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampTokenStyle {
    /// `YYYYMMDD` for midnight values, `YYYYMMDDHHMMSS` otherwise
    #[default]
    Auto,
    /// Always `YYYYMMDD`
    Date,
    /// Always `YYYYMMDDHHMMSS`
    DateTime,
}

impl TimestampTokenStyle {
    fn format_for(&self, value: &NaiveDateTime) -> &'static str {
        match self {
            TimestampTokenStyle::Date => DATE_TOKEN_FORMAT,
            TimestampTokenStyle::DateTime => DATETIME_TOKEN_FORMAT,
            TimestampTokenStyle::Auto => {
                if value.num_seconds_from_midnight() == 0 && value.nanosecond() == 0 {
                    DATE_TOKEN_FORMAT
                } else {
                    DATETIME_TOKEN_FORMAT
                }
            }
        }
    }
}

impl fmt::Display for TimestampTokenStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimestampTokenStyle::Auto => "auto",
            TimestampTokenStyle::Date => "date",
            TimestampTokenStyle::DateTime => "datetime",
        };
        f.write_str(name)
    }
}

impl FromStr for TimestampTokenStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(TimestampTokenStyle::Auto),
            "date" => Ok(TimestampTokenStyle::Date),
            "datetime" => Ok(TimestampTokenStyle::DateTime),
            _ => Err(format!(
                "Unknown timestamp token style: {}. Valid options: auto, date, datetime",
                s
            )),
        }
    }
}

/// Exact value of the partition column for one row
#[derive(Debug, Clone, PartialEq)]
pub enum PartitionKey {
    /// String value, verbatim
    Utf8(String),
    /// 32-bit float value
    Float32(f32),
    /// 64-bit float value
    Float64(f64),
    /// Microseconds since the Unix epoch
    Timestamp(i64),
}

impl PartitionKey {
    /// Value of `array` at `row`, `None` when the cell is null
    pub fn from_array(array: &dyn Array, row: usize) -> Result<Option<Self>, WriterError> {
        if array.is_null(row) {
            return Ok(None);
        }
        let key = match array.data_type() {
            DataType::Utf8 => PartitionKey::Utf8(array.as_string::<i32>().value(row).to_string()),
            DataType::Float32 => PartitionKey::Float32(array.as_primitive::<Float32Type>().value(row)),
            DataType::Float64 => PartitionKey::Float64(array.as_primitive::<Float64Type>().value(row)),
            DataType::Timestamp(TimeUnit::Microsecond, _) => {
                PartitionKey::Timestamp(array.as_primitive::<TimestampMicrosecondType>().value(row))
            }
            other => {
                return Err(WriterError::InvalidData(format!(
                    "unsupported partition column type {other}"
                )))
            }
        };
        Ok(Some(key))
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionKey::Utf8(value) => f.write_str(value),
            PartitionKey::Float32(value) => write!(f, "{value}"),
            PartitionKey::Float64(value) => write!(f, "{value}"),
            PartitionKey::Timestamp(micros) => match DateTime::from_timestamp_micros(*micros) {
                Some(value) => write!(f, "{}", value.naive_utc()),
                None => write!(f, "{micros}us"),
            },
        }
    }
}

/// Render a partition value as the file-name token of its segments.
///
/// Timestamps follow `style`, including string values that read as MMS
/// timestamps (`YYYY/MM/DD[ HH:MM:SS]`). Any other value uses its canonical string with
/// `/` and `\` removed and every byte outside `[A-Za-z0-9._-]` percent-encoded,
/// so the token is always a single path component.
///
/// # Example
///
/// ```
/// use nempart::writer::{partition_token, PartitionKey, TimestampTokenStyle};
///
/// let key = PartitionKey::Utf8("2009/01/01 00:00:00".to_string());
/// assert_eq!(partition_token(&key, TimestampTokenStyle::Auto).unwrap(), "20090101");
/// ```
pub fn partition_token(key: &PartitionKey, style: TimestampTokenStyle) -> Result<String, WriterError> {
    let token = match key {
        PartitionKey::Timestamp(micros) => {
            let value = DateTime::from_timestamp_micros(*micros)
                .ok_or_else(|| WriterError::InvalidPartitionToken(key.to_string()))?
                .naive_utc();
            timestamp_token(&value, style)
        }
        // Date columns of untyped tables still carry MMS timestamps as text
        PartitionKey::Utf8(text) => match parse_timestamp(text) {
            Some(value) => timestamp_token(&value, style),
            None => encode_component(text),
        },
        other => encode_component(&other.to_string()),
    };

    if token.is_empty() || token == "." || token == ".." {
        return Err(WriterError::InvalidPartitionToken(key.to_string()));
    }
    Ok(token)
}

fn timestamp_token(value: &NaiveDateTime, style: TimestampTokenStyle) -> String {
    value.format(style.format_for(value)).to_string()
}

fn encode_component(value: &str) -> String {
    let mut token = String::with_capacity(value.len());
    for byte in value.bytes().filter(|b| *b != b'/' && *b != b'\\') {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
            token.push(byte as char);
        } else {
            token.push_str(&format!("%{byte:02X}"));
        }
    }
    token
}
