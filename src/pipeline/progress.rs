use log::info;

use crate::reader::SizeEstimate;

/// Logs progress against the row count estimated from a leading sample
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    estimate: Option<SizeEstimate>,
    estimated_rows: u64,
}

impl ProgressReporter {
    /// Reporter for a file of `file_size` bytes; silent without an estimate
    pub fn new(estimate: Option<SizeEstimate>, file_size: u64) -> Self {
        let estimated_rows = estimate.map_or(0, |e| e.estimated_rows(file_size));
        Self {
            estimate,
            estimated_rows,
        }
    }

    /// Reporter that never logs
    pub fn disabled() -> Self {
        Self::new(None, 0)
    }

    /// Whether progress is reported
    pub fn is_enabled(&self) -> bool {
        self.estimate.is_some() && self.estimated_rows > 0
    }

    /// Approximate total data rows of the file
    pub fn estimated_rows(&self) -> Option<u64> {
        self.is_enabled().then_some(self.estimated_rows)
    }

    /// Fraction done after `rows_read` rows, capped at 100%
    pub fn percent(&self, rows_read: u64) -> Option<f64> {
        self.estimated_rows()
            .map(|total| (rows_read as f64 / total as f64 * 100.0).min(100.0))
    }

    /// Log progress after a batch of `batch_rows` rows
    pub fn report(&self, batches_read: u64, rows_read: u64, batch_rows: usize) {
        let (Some(estimate), Some(pct)) = (self.estimate, self.percent(rows_read)) else {
            return;
        };
        info!(
            "Progress: batch {} ({} rows, ~{:.1} MiB), {}/~{} rows ({:.1}%)",
            batches_read,
            batch_rows,
            estimate.batch_memory_bytes(batch_rows) as f64 / (1024.0 * 1024.0),
            rows_read,
            self.estimated_rows,
            pct
        );
    }
}
