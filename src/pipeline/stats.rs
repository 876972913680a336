use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use crate::schema::TableKind;
use crate::writer::SegmentInfo;

/// Statistics from a conversion
#[derive(Debug, Clone)]
pub struct ConversionStats {
    /// Detected table kind
    pub table_kind: TableKind,
    /// Partition column used
    pub partition_column: String,
    /// Rows read from the input, trailer included
    pub input_rows: u64,
    /// Rows written across all segments
    pub rows_written: u64,
    /// Batches read from the input
    pub batches_read: u64,
    /// Segments written, in write order
    pub segments: Vec<SegmentInfo>,
    /// Whether a final row was removed as the trailer
    pub trailer_dropped: bool,
    /// Size of the source file in bytes
    pub source_file_size: u64,
    /// Total size of the written segments in bytes
    pub output_bytes: u64,
    /// Wall-clock duration
    pub elapsed: Duration,
}

impl ConversionStats {
    pub(crate) fn new(table_kind: TableKind, partition_column: &str, source_file_size: u64) -> Self {
        Self {
            table_kind,
            partition_column: partition_column.to_string(),
            input_rows: 0,
            rows_written: 0,
            batches_read: 0,
            segments: Vec::new(),
            trailer_dropped: false,
            source_file_size,
            output_bytes: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn record_segments(&mut self, segments: Vec<SegmentInfo>) {
        for segment in segments {
            self.rows_written += segment.rows as u64;
            self.output_bytes += segment.file_size_bytes;
            self.segments.push(segment);
        }
    }

    /// Distinct partition tokens written, sorted
    pub fn tokens(&self) -> BTreeSet<&str> {
        self.segments.iter().map(|s| s.token.as_str()).collect()
    }

    /// Source size over output size
    pub fn compression_ratio(&self) -> f64 {
        if self.output_bytes == 0 {
            return 0.0;
        }
        self.source_file_size as f64 / self.output_bytes as f64
    }
}

impl fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows -> {} segments for {} {} values in {:.2}s",
            self.rows_written,
            self.segments.len(),
            self.tokens().len(),
            self.partition_column,
            self.elapsed.as_secs_f64()
        )
    }
}
