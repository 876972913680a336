use std::fmt;

/// Running totals of a [`PartitionWriter`](super::PartitionWriter)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Number of segment files written
    pub segments_written: usize,
    /// Total number of rows written across segments
    pub rows_written: usize,
    /// Total size of the written segments in bytes
    pub bytes_written: u64,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} rows in {} segments ({} bytes)",
            self.rows_written, self.segments_written, self.bytes_written
        )
    }
}
