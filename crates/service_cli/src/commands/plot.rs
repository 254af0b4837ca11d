//! Plot command implementation
//!
//! Reads a comparison CSV and renders the two diagnostic charts for the
//! contracts quoted with a positive implied volatility.

use std::path::{Path, PathBuf};

use adapter_loader::{read_rows, ComparisonRow};
use tracing::info;

use crate::charts::{self, ERROR_CHART_FILE, PRICE_CHART_FILE};
use crate::{CliError, Result};

/// Run the plot command
pub fn run(input: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input.exists() {
        return Err(CliError::FileNotFound(input.display().to_string()));
    }

    let rows = read_rows(input)?;
    let liquid = liquid_rows(rows);
    if liquid.is_empty() {
        return Err(CliError::invalid_argument(format!(
            "{} has no contracts with iv > 0",
            input.display()
        )));
    }
    info!(rows = liquid.len(), "Plotting liquid contracts");

    std::fs::create_dir_all(output_dir)?;

    let price_path = output_dir.join(PRICE_CHART_FILE);
    charts::price_scatter(&liquid, &price_path)?;

    let error_path = output_dir.join(ERROR_CHART_FILE);
    charts::error_by_strike(&liquid, &error_path)?;

    for path in [&price_path, &error_path] {
        info!(path = %path.display(), "Chart written to file");
        println!("Saved chart to {}", path.display());
    }

    Ok(vec![price_path, error_path])
}

/// Drops contracts without a positive implied volatility.
fn liquid_rows(rows: Vec<ComparisonRow>) -> Vec<ComparisonRow> {
    rows.into_iter().filter(ComparisonRow::is_liquid).collect()
}
