//! Refresh command implementation.

use anyhow::Result;
use gold_data::RefreshStatus;
use serde_json::json;
use std::path::Path;

use super::{load_settings, refreshed_series};
use crate::cli::{OutputFormat, RefreshArgs};

pub async fn run(args: RefreshArgs, config_path: &Path) -> Result<()> {
    let config = load_settings(config_path)?;
    let outcome = refreshed_series(&config, args.today).await?;
    let series = &outcome.series;

    match args.output {
        OutputFormat::Json => {
            let report = json!({
                "ticker": config.cache.ticker,
                "path": config.cache.path,
                "rows": series.len(),
                "first_date": series.first_date(),
                "last_date": series.last_date(),
                "refresh": outcome.status,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("Ticker:     {}", config.cache.ticker);
            println!("Cache:      {}", config.cache.path);
            match (series.first_date(), series.last_date()) {
                (Some(first), Some(last)) => {
                    println!("Rows:       {} ({} ~ {})", series.len(), first, last)
                }
                _ => println!("Rows:       0"),
            }
            match &outcome.status {
                RefreshStatus::Current => println!("Status:     already up to date"),
                RefreshStatus::Refreshed {
                    fetched,
                    added,
                    replaced,
                } => println!(
                    "Status:     fetched {} rows, {} new, {} replaced",
                    fetched, added, replaced
                ),
                RefreshStatus::Degraded { reason } => {
                    println!("Status:     stale ({})", reason)
                }
            }
        }
    }

    Ok(())
}
