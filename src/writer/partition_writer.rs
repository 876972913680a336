use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use arrow::array::{Array, AsArray, UInt32Array};
use arrow::compute::take_record_batch;
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, SchemaRef, TimeUnit, TimestampMicrosecondType,
};
use arrow::record_batch::RecordBatch;
use log::debug;
use parquet::arrow::ArrowWriter;

use crate::metadata::SegmentMetadata;

use super::config::WriterConfig;
use super::error::WriterError;
use super::sequence::{scan_sequence, segment_file_name};
use super::stats::WriterStats;
use super::token::{partition_token, PartitionKey};

/// A segment file written by the [`PartitionWriter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentInfo {
    /// Full path of the segment
    pub path: PathBuf,
    /// Partition token of the segment
    pub token: String,
    /// Sequence number within the token
    pub sequence: u32,
    /// Rows in the segment
    pub rows: usize,
    /// File size in bytes
    pub file_size_bytes: u64,
}

/// Borrowed grouping key; floats compare by bit pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum RowKey<'a> {
    Utf8(&'a str),
    Bits(u64),
}

/// Rows of one partition value within a batch
struct RowGroup {
    key: PartitionKey,
    rows: Vec<u32>,
}

/// Writes batches as Parquet segment files, one per distinct partition value.
///
/// Each call to [`write_batch`](Self::write_batch) writes exactly one new
/// segment per distinct value in the batch, named
/// `<token>-chunk-<NNN>.parquet` with `NNN` one past the highest existing
/// suffix for that token. Existing segments are never overwritten.
///
/// The directory is globbed for a token's existing segments only the first
/// time that token is written; later segments take the next number from a
/// per-token cache instead of rescanning. This assumes the writer is the only
/// one writing its output directory. If another process does create a
/// segment under the cached name, no-clobber persistence refuses it with
/// [`WriterError::SegmentExists`] and the existing file stays untouched.
pub struct PartitionWriter {
    output_dir: PathBuf,
    schema: SchemaRef,
    partition_index: usize,
    config: WriterConfig,
    metadata: SegmentMetadata,
    next_sequences: HashMap<String, u32>,
    stats: WriterStats,
}

impl PartitionWriter {
    /// Create a writer into `output_dir` (created if missing)
    pub fn new<P: AsRef<Path>>(
        output_dir: P,
        schema: SchemaRef,
        partition_index: usize,
        metadata: SegmentMetadata,
        config: WriterConfig,
    ) -> Result<Self, WriterError> {
        if partition_index >= schema.fields().len() {
            return Err(WriterError::InvalidData(format!(
                "partition column index {} out of range for {} columns",
                partition_index,
                schema.fields().len()
            )));
        }

        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;

        Ok(Self {
            output_dir,
            schema,
            partition_index,
            config,
            metadata,
            next_sequences: HashMap::new(),
            stats: WriterStats::default(),
        })
    }

    /// Directory segments are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Totals so far
    pub fn stats(&self) -> &WriterStats {
        &self.stats
    }

    /// Name of the partition column
    pub fn partition_column(&self) -> &str {
        self.schema.field(self.partition_index).name()
    }

    /// Write one segment per distinct partition value in `batch`.
    ///
    /// Segments are returned in first-seen order of their values. An empty
    /// batch writes nothing.
    pub fn write_batch(&mut self, batch: &RecordBatch) -> Result<Vec<SegmentInfo>, WriterError> {
        if batch.num_rows() == 0 {
            return Ok(Vec::new());
        }
        let schema = batch.schema();
        let same_layout = schema.fields().len() == self.schema.fields().len()
            && schema
                .fields()
                .iter()
                .zip(self.schema.fields())
                .all(|(a, b)| a.name() == b.name() && a.data_type() == b.data_type());
        if !same_layout {
            return Err(WriterError::InvalidData(
                "batch schema does not match the writer schema".to_string(),
            ));
        }

        if batch.num_rows() > u32::MAX as usize {
            return Err(WriterError::InvalidData(format!(
                "batch of {} rows exceeds the {} rows addressable per segment write",
                batch.num_rows(),
                u32::MAX
            )));
        }

        let groups = self.group_rows(batch)?;

        // Tokens are derived up front so a bad value fails before any file is written
        let mut tokens = Vec::with_capacity(groups.len());
        for group in &groups {
            tokens.push(partition_token(&group.key, self.config.timestamp_token)?);
        }

        let mut segments = Vec::with_capacity(groups.len());
        if groups.len() == 1 {
            segments.push(self.write_segment(&tokens[0], batch)?);
            return Ok(segments);
        }

        for (group, token) in groups.into_iter().zip(tokens) {
            let indices = UInt32Array::from(group.rows);
            let part = take_record_batch(batch, &indices)?;
            segments.push(self.write_segment(&token, &part)?);
        }
        Ok(segments)
    }

    fn group_rows(&self, batch: &RecordBatch) -> Result<Vec<RowGroup>, WriterError> {
        let column = batch.column(self.partition_index);
        let mut positions: HashMap<RowKey<'_>, usize> = HashMap::new();
        let mut groups: Vec<RowGroup> = Vec::new();

        for row in 0..batch.num_rows() {
            if column.is_null(row) {
                return Err(WriterError::NullPartitionValue {
                    column: self.partition_column().to_string(),
                    row,
                });
            }

            let key = match column.data_type() {
                DataType::Utf8 => RowKey::Utf8(column.as_string::<i32>().value(row)),
                DataType::Float32 => {
                    RowKey::Bits(column.as_primitive::<Float32Type>().value(row).to_bits() as u64)
                }
                DataType::Float64 => {
                    RowKey::Bits(column.as_primitive::<Float64Type>().value(row).to_bits())
                }
                DataType::Timestamp(TimeUnit::Microsecond, _) => RowKey::Bits(
                    column.as_primitive::<TimestampMicrosecondType>().value(row) as u64,
                ),
                other => {
                    return Err(WriterError::InvalidData(format!(
                        "unsupported partition column type {other}"
                    )))
                }
            };

            match positions.get(&key) {
                Some(&index) => groups[index].rows.push(row as u32),
                None => {
                    let owned = PartitionKey::from_array(column.as_ref(), row)?.ok_or_else(|| {
                        WriterError::NullPartitionValue {
                            column: self.partition_column().to_string(),
                            row,
                        }
                    })?;
                    positions.insert(key, groups.len());
                    groups.push(RowGroup {
                        key: owned,
                        rows: vec![row as u32],
                    });
                }
            }
        }

        Ok(groups)
    }

    /// Cached next sequence for `token`, scanning the directory on first use
    fn next_sequence(&mut self, token: &str) -> Result<u32, WriterError> {
        match self.next_sequences.get(token) {
            Some(&sequence) => Ok(sequence),
            None => scan_sequence(&self.output_dir, token),
        }
    }

    fn write_segment(&mut self, token: &str, batch: &RecordBatch) -> Result<SegmentInfo, WriterError> {
        let sequence = self.next_sequence(token)?;
        let path = self.output_dir.join(segment_file_name(token, sequence));

        let footer = self.metadata.for_token(token).to_parquet_metadata()?;
        let props = self.config.to_writer_properties(&self.schema, &footer);

        // Written under a hidden temporary name, then moved into place
        let mut tmp = tempfile::Builder::new()
            .prefix(".nempart-")
            .suffix(".tmp")
            .tempfile_in(&self.output_dir)?;
        {
            let mut writer = ArrowWriter::try_new(tmp.as_file_mut(), self.schema.clone(), Some(props))?;
            writer.write(batch)?;
            writer.close()?;
        }
        tmp.as_file().sync_all()?;

        tmp.persist_noclobber(&path).map_err(|e| {
            if e.error.kind() == ErrorKind::AlreadyExists {
                WriterError::SegmentExists(path.clone())
            } else {
                WriterError::IoError(e.error)
            }
        })?;

        let file_size_bytes = fs::metadata(&path)?.len();
        self.next_sequences.insert(token.to_string(), sequence.saturating_add(1));

        self.stats.segments_written += 1;
        self.stats.rows_written += batch.num_rows();
        self.stats.bytes_written += file_size_bytes;

        debug!(
            "Wrote {} ({} rows, {} bytes)",
            path.display(),
            batch.num_rows(),
            file_size_bytes
        );

        Ok(SegmentInfo {
            path,
            token: token.to_string(),
            sequence,
            rows: batch.num_rows(),
            file_size_bytes,
        })
    }
}
