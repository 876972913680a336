use std::sync::Arc;

use arrow::array::{
    ArrayRef, Float32Builder, Float64Builder, StringBuilder,
    TimestampMicrosecondBuilder,
};
use chrono::{NaiveDate, NaiveDateTime};

use crate::schema::{ColumnType, MMS_DATE_FORMAT, MMS_TIMESTAMP_FORMAT};

/// Parse an MMS timestamp cell.
///
/// Accepts `YYYY/MM/DD HH:MM:SS` and, for date-only cells, `YYYY/MM/DD`
/// (read as midnight).
pub fn parse_timestamp(cell: &str) -> Option<NaiveDateTime> {
    let cell = cell.trim();
    NaiveDateTime::parse_from_str(cell, MMS_TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(cell, MMS_DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Microseconds since the Unix epoch of a naive market timestamp
pub fn timestamp_micros(value: &NaiveDateTime) -> i64 {
    value.and_utc().timestamp_micros()
}

/// Typed Arrow builder for one column of a batch
pub(crate) enum ColumnBuilder {
    Utf8(StringBuilder),
    Float32(Float32Builder),
    Float64(Float64Builder),
    Timestamp(TimestampMicrosecondBuilder),
}

impl ColumnBuilder {
    pub(crate) fn with_capacity(column_type: ColumnType, capacity: usize) -> Self {
        match column_type {
            ColumnType::Utf8 => {
                ColumnBuilder::Utf8(StringBuilder::with_capacity(capacity, capacity * 8))
            }
            ColumnType::Float32 => ColumnBuilder::Float32(Float32Builder::with_capacity(capacity)),
            ColumnType::Float64 => ColumnBuilder::Float64(Float64Builder::with_capacity(capacity)),
            ColumnType::Timestamp => {
                ColumnBuilder::Timestamp(TimestampMicrosecondBuilder::with_capacity(capacity))
            }
        }
    }

    pub(crate) fn append_null(&mut self) {
        match self {
            ColumnBuilder::Utf8(b) => b.append_null(),
            ColumnBuilder::Float32(b) => b.append_null(),
            ColumnBuilder::Float64(b) => b.append_null(),
            ColumnBuilder::Timestamp(b) => b.append_null(),
        }
    }

    /// Append a non-null cell. Returns `false` if the cell does not parse.
    pub(crate) fn append_cell(&mut self, cell: &str) -> bool {
        match self {
            ColumnBuilder::Utf8(b) => {
                b.append_value(cell);
                true
            }
            ColumnBuilder::Float32(b) => match cell.trim().parse::<f32>() {
                Ok(value) => {
                    b.append_value(value);
                    true
                }
                Err(_) => false,
            },
            ColumnBuilder::Float64(b) => match cell.trim().parse::<f64>() {
                Ok(value) => {
                    b.append_value(value);
                    true
                }
                Err(_) => false,
            },
            ColumnBuilder::Timestamp(b) => match parse_timestamp(cell) {
                Some(value) => {
                    b.append_value(timestamp_micros(&value));
                    true
                }
                None => false,
            },
        }
    }

    pub(crate) fn finish(&mut self) -> ArrayRef {
        match self {
            ColumnBuilder::Utf8(b) => Arc::new(b.finish()),
            ColumnBuilder::Float32(b) => Arc::new(b.finish()),
            ColumnBuilder::Float64(b) => Arc::new(b.finish()),
            ColumnBuilder::Timestamp(b) => Arc::new(b.finish()),
        }
    }
}
