//! Analyze command implementation.

use anyhow::{Context, Result};
use gold_analysis::AnalysisReport;
use std::path::Path;
use tracing::info;

use super::{load_settings, refreshed_series};
use crate::cli::{AnalyzeArgs, OutputFormat};

pub async fn run(args: AnalyzeArgs, config_path: &Path) -> Result<()> {
    let config = load_settings(config_path)?;
    let outcome = refreshed_series(&config, args.today).await?;

    let mut report = AnalysisReport::new(&config.cache.ticker, &outcome.series, args.period)
        .context("Failed to analyze price history")?
        .with_row_limit(config.display.history_rows);
    if let (Some(start), Some(end)) = (args.start, args.end) {
        report = report.with_range(&outcome.series, start, end)?;
    }

    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    if let Some(save_path) = &args.save {
        let json = report.to_json()?;
        std::fs::write(save_path, json)?;
        info!("Report saved to {:?}", save_path);
    }

    Ok(())
}
