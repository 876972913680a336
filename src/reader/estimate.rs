use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::debug;

use crate::schema::Schema;

use super::error::ReadError;

/// Rows sampled from the start of the file when estimating row size
pub const DEFAULT_SAMPLE_ROWS: usize = 1000;

/// Average per-row footprint measured on a leading sample of a file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeEstimate {
    /// Number of data rows actually sampled
    pub sample_rows: usize,
    /// Average encoded size of a row on disk
    pub disk_bytes_per_row: f64,
    /// Average size of a row once parsed into Arrow arrays
    pub memory_bytes_per_row: f64,
}

impl SizeEstimate {
    /// Approximate number of data rows in a file of `file_size` bytes
    pub fn estimated_rows(&self, file_size: u64) -> u64 {
        if self.disk_bytes_per_row <= 0.0 {
            return 0;
        }
        (file_size as f64 / self.disk_bytes_per_row).round() as u64
    }

    /// Approximate in-memory size of a batch of `rows` rows
    pub fn batch_memory_bytes(&self, rows: usize) -> u64 {
        (self.memory_bytes_per_row * rows as f64).round() as u64
    }
}

/// Estimate the average row size of a raw table file.
///
/// Reads at most `sample_rows` data rows past the two header lines. Returns
/// `None` when the file has no data rows.
pub fn estimate_row_size<P: AsRef<Path>>(
    path: P,
    schema: &Schema,
    sample_rows: usize,
) -> Result<Option<SizeEstimate>, ReadError> {
    let file = File::open(path.as_ref())?;
    estimate_row_size_from(file, schema, sample_rows)
}

/// Estimate the average row size from any reader positioned at the marker line
pub fn estimate_row_size_from<R: Read>(
    reader: R,
    schema: &Schema,
    sample_rows: usize,
) -> Result<Option<SizeEstimate>, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut record = StringRecord::new();

    for _ in 0..2 {
        if !reader.read_record(&mut record)? {
            return Err(ReadError::MissingHeader);
        }
    }
    let data_start = reader.position().byte();

    let mut rows = 0usize;
    let mut memory_bytes = 0f64;
    while rows < sample_rows && reader.read_record(&mut record)? {
        memory_bytes += record_memory_bytes(&record, schema);
        rows += 1;
    }

    if rows == 0 {
        return Ok(None);
    }

    let disk_bytes = reader.position().byte().saturating_sub(data_start);
    let estimate = SizeEstimate {
        sample_rows: rows,
        disk_bytes_per_row: disk_bytes as f64 / rows as f64,
        memory_bytes_per_row: memory_bytes / rows as f64,
    };
    debug!(
        "Sampled {} rows: {:.1} bytes/row on disk, {:.1} bytes/row in memory",
        estimate.sample_rows, estimate.disk_bytes_per_row, estimate.memory_bytes_per_row
    );
    Ok(Some(estimate))
}

fn record_memory_bytes(record: &StringRecord, schema: &Schema) -> f64 {
    schema
        .iter()
        .enumerate()
        .map(|(index, (_, ty))| {
            // One validity bit per cell
            let validity = 0.125;
            let value = match ty.fixed_width() {
                Some(width) => width,
                None => record.get(index).map_or(0, str::len) + 4,
            };
            value as f64 + validity
        })
        .sum()
}
