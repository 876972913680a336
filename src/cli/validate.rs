use anyhow::Result;
use log::info;
use std::path::PathBuf;

/// Validate a directory of segment files
pub fn run(dir: PathBuf) -> Result<()> {
    use nempart::validator::validate_partition_dir;

    info!("nempart Validator");
    info!("=================");
    info!("Directory: {}", dir.display());
    info!("");

    match validate_partition_dir(&dir) {
        Ok(report) => {
            #[cfg(feature = "colorized_output")]
            {
                println!("{}", report.format_colored());
            }

            #[cfg(not(feature = "colorized_output"))]
            {
                println!("{}", report);
            }

            // Exit with error code if validation failed
            if report.has_failures() {
                std::process::exit(1);
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    }
}
