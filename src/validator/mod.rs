//! # Segment Directory Validation
//!
//! Re-reads a directory written by the partition writer and checks the
//! invariants the writer promises.
//!
//! ## Validation Checklist
//!
//! 1. **Structure**: the path is a directory, Parquet files are named
//!    `<token>-chunk-<NNN>.parquet`, sequence numbers are unique per token,
//!    no temporary files were left by an interrupted run
//! 2. **Segments**: every segment opens, carries nempart footer metadata
//!    whose token matches its name, is non-empty and holds exactly one
//!    partition value
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nempart::validator::validate_partition_dir;
//! use std::path::Path;
//!
//! let result = validate_partition_dir(Path::new("output/TRADINGDATE"));
//! match result {
//!     Ok(report) => {
//!         println!("{}", report);
//!     }
//!     Err(e) => {
//!         eprintln!("Validation failed: {}", e);
//!     }
//! }
//! ```

use std::path::Path;

use anyhow::Result;

pub use report::{CheckStatus, PartitionSummary, ValidationCheck, ValidationReport};

mod report;
mod segments;
mod structure;

/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Error in directory structure
    #[error("Structure error: {0}")]
    StructureError(String),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the Parquet library
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),
}

/// Main validation entry point
pub fn validate_partition_dir(path: &Path) -> Result<ValidationReport> {
    let mut report = ValidationReport::new(path.display().to_string());

    // 1. Structure Check
    let segments = structure::check_structure(path, &mut report)?;

    // 2. Segment Check
    segments::check_segments(&segments, &mut report)?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::SegmentMetadata;
    use crate::schema::TableKind;
    use crate::writer::{PartitionWriter, WriterConfig};
    use arrow::array::{ArrayRef, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use std::sync::Arc;

    fn write_segments(dir: &Path, duids: &[&str]) {
        let schema = Arc::new(Schema::new(vec![Field::new("DUID", DataType::Utf8, true)]));
        let column: ArrayRef = Arc::new(StringArray::from(duids.to_vec()));
        let batch = RecordBatch::try_new(schema.clone(), vec![column]).unwrap();

        let mut writer = PartitionWriter::new(
            dir,
            schema,
            0,
            SegmentMetadata::new(TableKind::Unrecognized, "DUID"),
            WriterConfig::default(),
        )
        .unwrap();
        writer.write_batch(&batch).unwrap();
    }

    #[test]
    fn test_validation_report_display() {
        let mut report = ValidationReport::new("output/TRADINGDATE");
        report.add_check(ValidationCheck::ok("Test check 1"));
        report.add_check(ValidationCheck::warning("Test check 2", "This is a warning"));
        report.add_check(ValidationCheck::failed("Test check 3", "This failed"));

        let output = format!("{}", report);
        assert!(output.contains("✓"));
        assert!(output.contains("⚠"));
        assert!(output.contains("✗"));
        assert!(output.contains("1 passed, 1 warnings, 1 failed"));
    }

    #[test]
    fn test_valid_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_segments(dir.path(), &["A", "B", "A"]);
        write_segments(dir.path(), &["A"]);

        let report = validate_partition_dir(dir.path()).unwrap();
        assert!(!report.has_failures(), "{}", report);
        assert!(!report.has_warnings(), "{}", report);
        assert_eq!(report.segment_count(), 3);
        assert_eq!(report.total_rows(), 4);

        let a = &report.partitions["A"];
        assert_eq!(a.sequences, vec![1, 2]);
        assert_eq!(a.rows, 3);
        assert_eq!(report.partitions["B"].rows, 1);
    }

    #[test]
    fn test_detects_problems() {
        let dir = tempfile::tempdir().unwrap();
        write_segments(dir.path(), &["A"]);
        std::fs::write(dir.path().join("A-chunk-003.parquet"), b"not parquet").unwrap();
        std::fs::write(dir.path().join("stray.parquet"), b"").unwrap();
        std::fs::write(dir.path().join(".nempart-abc.tmp"), b"").unwrap();

        let report = validate_partition_dir(dir.path()).unwrap();
        assert!(report.has_failures());

        let status = |name: &str| {
            report
                .checks
                .iter()
                .find(|c| c.name.starts_with(name))
                .map(|c| c.status.clone())
                .unwrap()
        };
        assert!(matches!(status("Segment naming"), CheckStatus::Failed(_)));
        assert!(matches!(status("Segments readable"), CheckStatus::Failed(_)));
        assert!(matches!(status("Interrupted writes"), CheckStatus::Warning(_)));
        assert!(matches!(status("Contiguous sequence numbers"), CheckStatus::Warning(_)));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_partition_dir(&dir.path().join("missing")).is_err());
    }
}
