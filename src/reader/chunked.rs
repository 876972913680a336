use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use csv::StringRecord;
use log::debug;

use crate::schema::Schema;

use super::batch::RowBatch;
use super::cell::ColumnBuilder;
use super::config::{ReaderConfig, MAX_CHUNK_SIZE};
use super::error::ReadError;

/// Upper bound on rows preallocated per batch; builders grow past it as needed
const MAX_PREALLOCATED_ROWS: usize = 64 * 1024;

/// Streams a raw table file as typed [`RowBatch`]es of at most `chunk_size` rows.
///
/// The marker and header lines are skipped. The trailer row is not
/// recognised here: it ends up as the last row of the last batch.
///
/// # Example
///
/// ```rust,no_run
/// use nempart::reader::{ChunkedReader, ReaderConfig};
/// use nempart::schema::{read_header, Schema, TableKind};
///
/// let header = read_header("PUBLIC_DVD_BIDPEROFFER_202107010000.CSV")?;
/// let schema = Schema::resolve(TableKind::BidPerOffer, &header);
/// let reader = ChunkedReader::open(
///     "PUBLIC_DVD_BIDPEROFFER_202107010000.CSV",
///     schema,
///     ReaderConfig::with_chunk_size(100_000),
/// )?;
///
/// for batch in reader {
///     println!("{} rows", batch?.num_rows());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ChunkedReader<R: Read> {
    reader: csv::Reader<R>,
    schema: Schema,
    arrow_schema: SchemaRef,
    config: ReaderConfig,
    path: Option<PathBuf>,
    record: StringRecord,
    exhausted: bool,
    rows_read: u64,
    batches_read: u64,
}

impl ChunkedReader<File> {
    /// Open a raw table file
    pub fn open<P: AsRef<Path>>(
        path: P,
        schema: Schema,
        config: ReaderConfig,
    ) -> Result<Self, ReadError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = Self::from_reader(file, schema, config)?;
        reader.path = Some(path.to_path_buf());
        Ok(reader)
    }

    /// Rewind to the first data row by reopening the file
    pub fn restart(&mut self) -> Result<(), ReadError> {
        let path = self.path.clone().ok_or_else(|| {
            ReadError::InvalidConfig("reader was not opened from a path".to_string())
        })?;
        let file = File::open(&path)?;
        self.reader = build_csv_reader(file, &self.config);
        self.skip_header_lines()?;
        self.exhausted = false;
        self.rows_read = 0;
        self.batches_read = 0;
        debug!("Restarted reader on {}", path.display());
        Ok(())
    }
}

impl<R: Read> ChunkedReader<R> {
    /// Wrap any reader positioned at the marker line
    pub fn from_reader(reader: R, schema: Schema, config: ReaderConfig) -> Result<Self, ReadError> {
        if config.chunk_size == 0 {
            return Err(ReadError::InvalidConfig(
                "chunk size must be at least 1".to_string(),
            ));
        }
        if config.chunk_size > MAX_CHUNK_SIZE {
            return Err(ReadError::InvalidConfig(format!(
                "chunk size {} exceeds the maximum of {} rows",
                config.chunk_size, MAX_CHUNK_SIZE
            )));
        }

        let arrow_schema = schema.arrow_schema();
        let mut chunked = Self {
            reader: build_csv_reader(reader, &config),
            schema,
            arrow_schema,
            config,
            path: None,
            record: StringRecord::new(),
            exhausted: false,
            rows_read: 0,
            batches_read: 0,
        };
        chunked.skip_header_lines()?;
        Ok(chunked)
    }

    fn skip_header_lines(&mut self) -> Result<(), ReadError> {
        // Marker line, then the header
        if !self.reader.read_record(&mut self.record)? {
            return Err(ReadError::MissingHeader);
        }
        if !self.reader.read_record(&mut self.record)? {
            return Err(ReadError::MissingHeader);
        }
        if self.record.len() != self.schema.len() {
            return Err(ReadError::SchemaMismatch {
                found: self.record.len(),
                expected: self.schema.len(),
            });
        }
        Ok(())
    }

    /// Schema the batches are parsed with
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Arrow schema of the produced batches
    pub fn arrow_schema(&self) -> SchemaRef {
        self.arrow_schema.clone()
    }

    /// Rows parsed so far
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    /// Batches produced so far
    pub fn batches_read(&self) -> u64 {
        self.batches_read
    }

    /// Bytes consumed from the input so far
    pub fn bytes_read(&self) -> u64 {
        self.reader.position().byte()
    }

    /// Read the next batch, `None` once the input is exhausted
    pub fn next_batch(&mut self) -> Result<Option<RowBatch>, ReadError> {
        if self.exhausted {
            return Ok(None);
        }

        let capacity = self.config.chunk_size.min(MAX_PREALLOCATED_ROWS);
        let mut builders: Vec<ColumnBuilder> = self
            .schema
            .iter()
            .map(|(_, ty)| ColumnBuilder::with_capacity(ty, capacity))
            .collect();

        let mut rows = 0usize;
        let mut first_line = None;

        while rows < self.config.chunk_size {
            if !self.reader.read_record(&mut self.record)? {
                self.exhausted = true;
                break;
            }

            let line = self.record.position().map(|p| p.line()).unwrap_or(0);
            first_line.get_or_insert(line);

            if self.record.len() > self.schema.len() {
                return Err(ReadError::TooManyFields {
                    line,
                    found: self.record.len(),
                    expected: self.schema.len(),
                });
            }

            // Rows shorter than the header (the trailer) are padded with nulls
            for (index, builder) in builders.iter_mut().enumerate() {
                match self.record.get(index) {
                    Some(cell) if !self.config.is_null(cell) => {
                        if !builder.append_cell(cell) {
                            return Err(ReadError::InvalidCell {
                                line,
                                column: self.schema.column_name(index).to_string(),
                                value: cell.to_string(),
                                expected: self.schema.column_type(index),
                            });
                        }
                    }
                    _ => builder.append_null(),
                }
            }
            rows += 1;
        }

        if rows == 0 {
            return Ok(None);
        }

        let columns = builders.iter_mut().map(ColumnBuilder::finish).collect();
        let batch = RecordBatch::try_new(self.arrow_schema.clone(), columns)?;

        self.rows_read += rows as u64;
        self.batches_read += 1;

        Ok(Some(RowBatch::new(batch, first_line.unwrap_or(0))))
    }
}

impl<R: Read> Iterator for ChunkedReader<R> {
    type Item = Result<RowBatch, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_batch() {
            Ok(Some(batch)) => Some(Ok(batch)),
            Ok(None) => None,
            Err(e) => {
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }
}

fn build_csv_reader<R: Read>(reader: R, config: &ReaderConfig) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .buffer_capacity(config.input_buffer_size)
        .from_reader(reader)
}
