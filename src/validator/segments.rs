use std::collections::{BTreeSet, HashMap};
use std::fs::File;

use anyhow::Result;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;

use crate::metadata::SegmentMetadata;
use crate::schema::{KEY_FORMAT_VERSION, NEMPART_FORMAT_VERSION};
use crate::writer::PartitionKey;

use super::structure::{preview, SegmentFile};
use super::{ValidationCheck, ValidationReport};

/// What went wrong with individual segments, grouped by check
#[derive(Default)]
struct Findings {
    unreadable: Vec<String>,
    missing_metadata: Vec<String>,
    version_mismatch: Vec<String>,
    token_mismatch: Vec<String>,
    empty: Vec<String>,
    mixed_values: Vec<String>,
    partition_columns: BTreeSet<String>,
}

/// Step 2: open every segment, check its footer and its partition column
pub(crate) fn check_segments(segments: &[SegmentFile], report: &mut ValidationReport) -> Result<()> {
    if segments.is_empty() {
        return Ok(());
    }

    let mut findings = Findings::default();
    for segment in segments {
        let name = segment
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match check_segment(segment, &name, &mut findings) {
            Ok((rows, bytes)) => {
                if let Some(summary) = report.partitions.get_mut(&segment.token) {
                    summary.rows += rows;
                    summary.bytes += bytes;
                }
            }
            Err(e) => findings.unreadable.push(format!("{name} ({e})")),
        }
    }

    add_result(report, "Segments readable", &findings.unreadable, true);
    add_result(report, "Footer metadata present", &findings.missing_metadata, true);
    add_result(report, "Format version", &findings.version_mismatch, false);
    add_result(report, "Footer token matches file name", &findings.token_mismatch, true);
    add_result(report, "Segments non-empty", &findings.empty, true);
    add_result(report, "One partition value per segment", &findings.mixed_values, true);

    match findings.partition_columns.len() {
        0 => {}
        1 => report.add_check(ValidationCheck::ok(format!(
            "Partition column ({})",
            findings.partition_columns.iter().next().map(String::as_str).unwrap_or_default()
        ))),
        _ => report.add_check(ValidationCheck::warning(
            "Partition column",
            format!(
                "Segments partitioned by different columns: {}",
                findings.partition_columns.iter().cloned().collect::<Vec<_>>().join(", ")
            ),
        )),
    }

    Ok(())
}

fn add_result(report: &mut ValidationReport, name: &str, problems: &[String], fatal: bool) {
    let check = match (problems.is_empty(), fatal) {
        (true, _) => ValidationCheck::ok(name),
        (false, true) => ValidationCheck::failed(name, preview(problems)),
        (false, false) => ValidationCheck::warning(name, preview(problems)),
    };
    report.add_check(check);
}

/// Returns rows and bytes of a readable segment
fn check_segment(segment: &SegmentFile, name: &str, findings: &mut Findings) -> Result<(u64, u64)> {
    let file = File::open(&segment.path)?;
    let bytes = file.metadata()?.len();
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let footer: HashMap<String, String> = builder
        .metadata()
        .file_metadata()
        .key_value_metadata()
        .map(|kvs| {
            kvs.iter()
                .filter_map(|kv| kv.value.clone().map(|v| (kv.key.clone(), v)))
                .collect()
        })
        .unwrap_or_default();

    let rows = builder.metadata().file_metadata().num_rows().max(0) as u64;
    if rows == 0 {
        findings.empty.push(name.to_string());
    }

    match footer.get(KEY_FORMAT_VERSION) {
        Some(version) if version != NEMPART_FORMAT_VERSION => {
            findings.version_mismatch.push(format!("{name} (v{version})"))
        }
        _ => {}
    }

    let metadata = match SegmentMetadata::from_parquet_metadata(&footer) {
        Ok(metadata) => metadata,
        Err(_) => {
            findings.missing_metadata.push(name.to_string());
            return Ok((rows, bytes));
        }
    };

    if metadata.partition_token.as_deref() != Some(segment.token.as_str()) {
        findings.token_mismatch.push(name.to_string());
    }
    findings.partition_columns.insert(metadata.partition_column.clone());

    let Ok(column_index) = builder.schema().index_of(&metadata.partition_column) else {
        findings.missing_metadata.push(format!("{name} (no {} column)", metadata.partition_column));
        return Ok((rows, bytes));
    };

    let mask = ProjectionMask::roots(builder.parquet_schema(), [column_index]);
    let reader = builder.with_projection(mask).build()?;

    let mut first: Option<String> = None;
    'batches: for batch in reader {
        let batch = batch?;
        let column = batch.column(0);
        for row in 0..batch.num_rows() {
            let value = PartitionKey::from_array(column.as_ref(), row)?.map(|key| key.to_string());
            match (&first, value) {
                (_, None) => {
                    findings.mixed_values.push(format!("{name} (null value)"));
                    break 'batches;
                }
                (None, Some(value)) => first = Some(value),
                (Some(expected), Some(value)) if *expected != value => {
                    findings.mixed_values.push(name.to_string());
                    break 'batches;
                }
                _ => {}
            }
        }
    }

    Ok((rows, bytes))
}
