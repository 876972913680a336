use anyhow::{Context, Result};
use glob::MatchOptions;
use log::{info, warn};
use std::path::{Path, PathBuf};

use nempart::pipeline::{ConversionConfig, Converter};
use nempart::schema::{read_header, Schema, TableKind};

/// Convert every raw table in `input_dir` matching `pattern`.
///
/// Each file is partitioned by its own default column (or the configured
/// one) into `output_dir/<PARTITION_COLUMN>/`. Files are processed one after
/// another; the first failure stops the run.
pub fn run(
    input_dir: PathBuf,
    output_dir: PathBuf,
    pattern: &str,
    delete_input: bool,
    config: ConversionConfig,
) -> Result<()> {
    if !input_dir.is_dir() {
        anyhow::bail!("Input directory does not exist: {}", input_dir.display());
    }

    let inputs = find_inputs(&input_dir, pattern)?;
    if inputs.is_empty() {
        warn!("No files matching {} in {}", pattern, input_dir.display());
        return Ok(());
    }
    info!("Found {} tables in {}", inputs.len(), input_dir.display());

    let mut total_rows = 0u64;
    let mut total_segments = 0usize;
    for (index, input) in inputs.iter().enumerate() {
        let column = partition_column_for(input, config.partition_column.as_deref())?;
        let target = output_dir.join(&column);

        info!(
            "[{}/{}] {} -> {}",
            index + 1,
            inputs.len(),
            input.display(),
            target.display()
        );

        let mut file_config = config.clone();
        file_config.partition_column = Some(column);
        let stats = Converter::with_config(file_config)
            .convert(input, &target)
            .with_context(|| format!("Conversion of {} failed", input.display()))?;

        info!("  {}", stats);
        total_rows += stats.rows_written;
        total_segments += stats.segments.len();

        if delete_input {
            std::fs::remove_file(input)
                .with_context(|| format!("Failed to delete {}", input.display()))?;
            info!("  Deleted {}", input.display());
        }
    }

    info!(
        "Batch complete: {} files, {} rows, {} segments",
        inputs.len(),
        total_rows,
        total_segments
    );
    Ok(())
}

fn find_inputs(input_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = format!(
        "{}/{}",
        glob::Pattern::escape(&input_dir.to_string_lossy()),
        pattern
    );
    let options = MatchOptions {
        case_sensitive: false,
        ..Default::default()
    };

    let mut inputs = Vec::new();
    for entry in glob::glob_with(&full, options).context("Invalid --pattern")? {
        let path = entry?;
        if path.is_file() {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Resolve the partition column the converter will use for `input`
fn partition_column_for(input: &Path, requested: Option<&str>) -> Result<String> {
    let header = read_header(input)
        .with_context(|| format!("Failed to read header of {}", input.display()))?;
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let schema = Schema::resolve(TableKind::detect(&stem, &header), &header);
    let index = schema
        .partition_column(requested)
        .with_context(|| format!("No partition column for {}", input.display()))?;
    Ok(schema.column_name(index).to_string())
}
