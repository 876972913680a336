use std::fs;
use std::path::Path;
use std::time::Instant;

use log::{debug, info, warn};

use crate::metadata::{SegmentMetadata, SourceFileInfo};
use crate::reader::{estimate_row_size, ChunkedReader, RowBatch};
use crate::schema::{read_header, Schema, TableKind, INPUT_EXTENSION};
use crate::writer::{PartitionWriter, WriterError};

use super::lag::{strip_trailer, BatchLag};
use super::progress::ProgressReporter;
use super::{ConversionError, ConversionStats, Converter, PipelineState};

impl Converter {
    /// Convert one raw table file into segments under `output_dir`.
    ///
    /// `output_dir` is created if missing. The input file is left in place.
    /// On error the converter ends in [`PipelineState::Aborted`] and any
    /// segments written before the failure remain.
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
        &mut self,
        input_path: P,
        output_dir: Q,
    ) -> Result<ConversionStats, ConversionError> {
        if self.state.is_terminal() {
            self.transition(PipelineState::Idle);
        }

        let result = self.run(input_path.as_ref(), output_dir.as_ref());
        if let Err(ref e) = result {
            warn!("Conversion aborted in {} state: {}", self.state, e);
            self.transition(PipelineState::Aborted);
        }
        result
    }

    fn transition(&mut self, next: PipelineState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal pipeline transition {} -> {}",
            self.state,
            next
        );
        debug!("Pipeline state: {} -> {}", self.state, next);
        self.state = next;
    }

    fn run(&mut self, input_path: &Path, output_dir: &Path) -> Result<ConversionStats, ConversionError> {
        let started = Instant::now();
        check_input(input_path)?;

        self.transition(PipelineState::Resolving);
        info!("Converting {} to {}", input_path.display(), output_dir.display());

        let header = read_header(input_path)?;
        let stem = input_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let kind = TableKind::detect(&stem, &header);
        let schema = Schema::resolve(kind, &header);
        let partition_index = schema.partition_column(self.config.partition_column.as_deref())?;
        let partition_column = schema.column_name(partition_index).to_string();

        info!(
            "Table kind {} with {} columns, partitioned by {}",
            kind,
            schema.len(),
            partition_column
        );

        fs::create_dir_all(output_dir)?;

        let mut source = SourceFileInfo::from_path(input_path)?;
        source.header_columns = Some(header.len());
        let source_file_size = source.size_bytes.unwrap_or(0);
        let progress = self.progress_reporter(input_path, &schema, source_file_size);

        let metadata = SegmentMetadata::new(kind, &partition_column).with_source_file(source);
        let mut writer = PartitionWriter::new(
            output_dir,
            schema.arrow_schema(),
            partition_index,
            metadata,
            self.config.writer_config.clone(),
        )?;
        let mut reader = ChunkedReader::open(input_path, schema, self.config.reader_config.clone())?;
        let mut stats = ConversionStats::new(kind, &partition_column, source_file_size);

        self.transition(PipelineState::Streaming);
        let mut lag = BatchLag::new();
        while let Some(batch) = reader.next_batch()? {
            stats.batches_read += 1;
            stats.input_rows += batch.num_rows() as u64;
            progress.report(stats.batches_read, stats.input_rows, batch.num_rows());

            if let Some(ready) = lag.push(batch) {
                write_batch(&mut writer, &ready, &mut stats)?;
            }
        }

        self.transition(PipelineState::Draining);
        match lag.finish() {
            Some(last) => {
                warn_if_not_trailer(&last);
                let body = strip_trailer(&last);
                stats.trailer_dropped = true;
                if !body.is_empty() {
                    write_batch(&mut writer, &body, &mut stats)?;
                }
            }
            None => warn!("{} has no data rows", input_path.display()),
        }

        stats.elapsed = started.elapsed();
        self.transition(PipelineState::Done);

        info!("Conversion complete: {}", stats);
        info!("  Input size: {} bytes", stats.source_file_size);
        info!("  Output size: {} bytes", stats.output_bytes);
        info!("  Compression ratio: {:.2}x", stats.compression_ratio());

        Ok(stats)
    }

    fn progress_reporter(&self, input_path: &Path, schema: &Schema, file_size: u64) -> ProgressReporter {
        if self.config.sample_rows == 0 {
            return ProgressReporter::disabled();
        }
        match estimate_row_size(input_path, schema, self.config.sample_rows) {
            Ok(Some(estimate)) => {
                let progress = ProgressReporter::new(Some(estimate), file_size);
                if let Some(rows) = progress.estimated_rows() {
                    info!(
                        "Estimated ~{} rows ({:.1} bytes/row on disk, {:.1} bytes/row in memory)",
                        rows, estimate.disk_bytes_per_row, estimate.memory_bytes_per_row
                    );
                }
                progress
            }
            Ok(None) => ProgressReporter::disabled(),
            Err(e) => {
                warn!("Row size estimate failed, progress reporting disabled: {}", e);
                ProgressReporter::disabled()
            }
        }
    }
}

fn check_input(path: &Path) -> Result<(), ConversionError> {
    let invalid = |reason: &str| ConversionError::InvalidInput {
        path: path.display().to_string(),
        reason: reason.to_string(),
    };

    if !path.exists() {
        return Err(invalid("file does not exist"));
    }
    if !path.is_file() {
        return Err(invalid("not a regular file"));
    }
    let is_csv = path
        .extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(INPUT_EXTENSION))
        .unwrap_or(false);
    if !is_csv {
        return Err(invalid("expected a .csv file"));
    }
    Ok(())
}

fn write_batch(
    writer: &mut PartitionWriter,
    batch: &RowBatch,
    stats: &mut ConversionStats,
) -> Result<(), ConversionError> {
    match writer.write_batch(batch.record_batch()) {
        Ok(segments) => {
            stats.record_segments(segments);
            Ok(())
        }
        Err(WriterError::NullPartitionValue { column, row }) => {
            Err(ConversionError::NullPartitionValue {
                line: batch.first_line() + row as u64,
                column,
            })
        }
        Err(e) => Err(e.into()),
    }
}

fn warn_if_not_trailer(batch: &RowBatch) {
    use arrow::array::{Array, AsArray};
    use arrow::datatypes::DataType;

    let Some(last) = batch.num_rows().checked_sub(1) else {
        return;
    };
    let first_column = batch.record_batch().column(0);
    let is_trailer = first_column.data_type() == &DataType::Utf8
        && !first_column.is_null(last)
        && first_column.as_string::<i32>().value(last) == "C";
    if !is_trailer {
        warn!(
            "Last row of the file is not an end-of-report trailer; dropping it anyway (batch starting at line {})",
            batch.first_line()
        );
    }
}
