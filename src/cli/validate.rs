use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use phyloxml::validator::validate_phyloxml_file;

/// Validate a PhyloXML file; exits with status 1 if any check failed
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    info!("Validating {}", file.display());
    let report = validate_phyloxml_file(&file)
        .with_context(|| format!("Failed to validate {}", file.display()))?;

    println!("{}", report.format_colored());
    info!(
        "{} passed, {} warnings, {} failed",
        report.success_count(),
        report.warning_count(),
        report.failure_count()
    );

    if report.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
