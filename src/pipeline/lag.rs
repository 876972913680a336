use crate::reader::RowBatch;

/// Holds back one batch so the last batch of a file is known before it is written.
///
/// Every pushed batch displaces the previous one, which is then safe to
/// write. Once the input is exhausted, [`finish`](Self::finish) hands back
/// the final batch, the one that carries the trailer.
#[derive(Debug, Default)]
pub struct BatchLag {
    pending: Option<RowBatch>,
}

impl BatchLag {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `current` and return the batch it displaces
    pub fn push(&mut self, current: RowBatch) -> Option<RowBatch> {
        self.pending.replace(current)
    }

    /// Take the held-back last batch
    pub fn finish(&mut self) -> Option<RowBatch> {
        self.pending.take()
    }

    /// Whether a batch is held back
    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}

/// Remove the final row (the end-of-report trailer) from the last batch
pub fn strip_trailer(batch: &RowBatch) -> RowBatch {
    batch.without_last_row()
}
