use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::schema::SEGMENT_EXTENSION;
use crate::writer::split_segment_name;

use super::{PartitionSummary, ValidationCheck, ValidationError, ValidationReport};

/// A file in the directory whose name parses as a segment
#[derive(Debug, Clone)]
pub(crate) struct SegmentFile {
    pub(crate) path: PathBuf,
    pub(crate) token: String,
    pub(crate) sequence: u32,
}

/// Step 1: directory layout and segment naming
pub(crate) fn check_structure(path: &Path, report: &mut ValidationReport) -> Result<Vec<SegmentFile>> {
    if !path.exists() {
        report.add_check(ValidationCheck::failed(
            "Path exists",
            format!("Path does not exist: {}", path.display()),
        ));
        anyhow::bail!(ValidationError::StructureError("Path does not exist".to_string()));
    }
    report.add_check(ValidationCheck::ok("Path exists"));

    if !path.is_dir() {
        report.add_check(ValidationCheck::failed(
            "Is a directory",
            "Segments are validated per output directory",
        ));
        anyhow::bail!(ValidationError::StructureError("Not a directory".to_string()));
    }

    let mut segments = Vec::new();
    let mut misnamed = Vec::new();
    let mut leftovers = Vec::new();
    let mut other_files = 0usize;

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();

        if name.starts_with(".nempart-") && name.ends_with(".tmp") {
            leftovers.push(name);
        } else if let Some((token, sequence)) = split_segment_name(&name) {
            segments.push(SegmentFile {
                path: entry.path(),
                token: token.to_string(),
                sequence,
            });
        } else if name.ends_with(&format!(".{SEGMENT_EXTENSION}")) {
            misnamed.push(name);
        } else {
            other_files += 1;
        }
    }

    if segments.is_empty() {
        report.add_check(ValidationCheck::warning(
            "Segment files present",
            "No <token>-chunk-<NNN>.parquet files found",
        ));
    } else {
        report.add_check(ValidationCheck::ok(format!(
            "Segment files present ({})",
            segments.len()
        )));
    }

    if misnamed.is_empty() {
        report.add_check(ValidationCheck::ok("Segment naming"));
    } else {
        misnamed.sort();
        report.add_check(ValidationCheck::failed(
            "Segment naming",
            format!("Parquet files not named <token>-chunk-<NNN>.parquet: {}", preview(&misnamed)),
        ));
    }

    if !leftovers.is_empty() {
        leftovers.sort();
        report.add_check(ValidationCheck::warning(
            "Interrupted writes",
            format!("Temporary files from an interrupted run: {}", preview(&leftovers)),
        ));
    }

    if other_files > 0 {
        report.add_check(ValidationCheck::warning(
            "Unrelated files",
            format!("{} non-segment files in the directory", other_files),
        ));
    }

    check_sequences(&segments, report);

    segments.sort_by(|a, b| a.token.cmp(&b.token).then(a.sequence.cmp(&b.sequence)));
    Ok(segments)
}

/// Sequence numbers per token must be unique; gaps are reported
fn check_sequences(segments: &[SegmentFile], report: &mut ValidationReport) {
    let mut by_token: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for segment in segments {
        by_token.entry(segment.token.as_str()).or_default().push(segment.sequence);
    }

    let mut duplicates = Vec::new();
    let mut gaps = Vec::new();
    for (token, sequences) in &mut by_token {
        sequences.sort_unstable();
        let before = sequences.len();
        sequences.dedup();
        if sequences.len() != before {
            duplicates.push(token.to_string());
        }
        let expected = sequences.last().copied().unwrap_or(0) as usize;
        if sequences.first() != Some(&1) || sequences.len() != expected {
            gaps.push(token.to_string());
        }

        report.partitions.insert(
            token.to_string(),
            PartitionSummary {
                sequences: sequences.clone(),
                ..Default::default()
            },
        );
    }

    if duplicates.is_empty() {
        report.add_check(ValidationCheck::ok("Unique sequence numbers"));
    } else {
        report.add_check(ValidationCheck::failed(
            "Unique sequence numbers",
            format!("Same sequence number under two names for: {}", preview(&duplicates)),
        ));
    }

    if !gaps.is_empty() {
        report.add_check(ValidationCheck::warning(
            "Contiguous sequence numbers",
            format!("Sequence does not run 001..N for: {}", preview(&gaps)),
        ));
    }
}

pub(crate) fn preview(names: &[String]) -> String {
    const SHOWN: usize = 5;
    let mut text = names.iter().take(SHOWN).cloned().collect::<Vec<_>>().join(", ");
    if names.len() > SHOWN {
        text.push_str(&format!(" and {} more", names.len() - SHOWN));
    }
    text
}
