use anyhow::{Context, Result};
use std::path::PathBuf;

use nempart::reader::{estimate_row_size, DEFAULT_SAMPLE_ROWS};
use nempart::schema::{read_header, Schema, TableKind};

/// Display information about a raw MMS table
pub fn run(input: PathBuf) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("File does not exist: {}", input.display());
    }

    let header = read_header(&input).context("Failed to read header")?;
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let kind = TableKind::detect(&stem, &header);
    let schema = Schema::resolve(kind, &header);
    let file_size = std::fs::metadata(&input)?.len();

    println!("nempart Table Information");
    println!("=========================");
    println!("File: {}", input.display());
    println!("Size: {} bytes ({:.2} MB)", file_size, file_size as f64 / 1024.0 / 1024.0);
    println!("Table kind: {}", kind);
    println!();

    println!("Columns:");
    for (i, (name, ty)) in schema.iter().enumerate() {
        println!("  {:3}. {} ({})", i + 1, name, ty);
    }
    println!();

    match schema.partition_column(None) {
        Ok(index) => println!("Default partition column: {}", schema.column_name(index)),
        Err(_) => println!("Default partition column: <none> (use --partition-column)"),
    }

    match estimate_row_size(&input, &schema, DEFAULT_SAMPLE_ROWS) {
        Ok(Some(estimate)) => {
            println!();
            println!("Size estimate ({} sampled rows):", estimate.sample_rows);
            println!("  Bytes per row on disk: {:.1}", estimate.disk_bytes_per_row);
            println!("  Bytes per row in memory: {:.1}", estimate.memory_bytes_per_row);
            println!("  Estimated rows: ~{}", estimate.estimated_rows(file_size));
        }
        Ok(None) => println!("\nNo data rows"),
        Err(e) => println!("\nSize estimate unavailable: {}", e),
    }

    Ok(())
}
