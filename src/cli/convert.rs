use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use nempart::pipeline::{ConversionConfig, Converter};

/// Convert one raw table into partitioned segments
pub fn run(input: PathBuf, output_dir: PathBuf, config: ConversionConfig) -> Result<()> {
    info!("nempart Converter - MMS table to Parquet segments");
    info!("==================================================");
    info!("Input:  {}", input.display());
    info!("Output: {}", output_dir.display());
    info!("Chunk size: {} rows", config.reader_config.chunk_size);
    info!("Compression: {:?}", config.writer_config.compression);
    info!("Row group size: {}", config.writer_config.row_group_size);
    if !config.reader_config.null_markers.is_empty() {
        info!("Null markers: {:?}", config.reader_config.null_markers);
    }

    let mut converter = Converter::with_config(config);

    info!("Starting conversion...");
    let stats = converter
        .convert(&input, &output_dir)
        .with_context(|| format!("Conversion of {} failed", input.display()))?;

    info!("Conversion complete!");
    info!("  Rows written: {}", stats.rows_written);
    info!("  Segments: {}", stats.segments.len());
    info!("  Partition values: {}", stats.tokens().len());
    info!(
        "  Output size: {} bytes ({:.2} MB)",
        stats.output_bytes,
        stats.output_bytes as f64 / 1024.0 / 1024.0
    );
    if stats.compression_ratio() > 0.0 {
        info!("  Compression ratio: {:.1}x", stats.compression_ratio());
    }

    info!("\nSegments can be read with any Parquet-compatible tool:");
    info!(
        "  - Python: pyarrow.dataset.dataset('{}').to_table().to_pandas()",
        output_dir.display()
    );
    info!(
        "  - DuckDB: SELECT * FROM read_parquet('{}/*.parquet')",
        output_dir.display()
    );

    Ok(())
}
