use arrow::record_batch::RecordBatch;

/// A bounded, in-order slice of parsed rows.
///
/// Wraps the columnar Arrow batch together with the physical line number of
/// its first row so that downstream errors can point back into the file.
#[derive(Debug, Clone)]
pub struct RowBatch {
    batch: RecordBatch,
    first_line: u64,
}

impl RowBatch {
    /// Wrap a parsed batch
    pub fn new(batch: RecordBatch, first_line: u64) -> Self {
        Self { batch, first_line }
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Whether the batch holds no rows
    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    /// 1-based physical line number of the first row
    pub fn first_line(&self) -> u64 {
        self.first_line
    }

    /// Borrow the columnar batch
    pub fn record_batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Take the columnar batch
    pub fn into_record_batch(self) -> RecordBatch {
        self.batch
    }

    /// Same batch without its final row (zero-copy slice)
    pub fn without_last_row(&self) -> RowBatch {
        let len = self.batch.num_rows().saturating_sub(1);
        RowBatch {
            batch: self.batch.slice(0, len),
            first_line: self.first_line,
        }
    }
}
