//! Home page: latest prices per ounce and per gram.

use anyhow::Result;
use gold_analysis::recent_prices;
use std::path::Path;

use super::{load_settings, refreshed_series};
use crate::cli::HomeArgs;

pub async fn run(args: HomeArgs, config_path: &Path) -> Result<()> {
    let config = load_settings(config_path)?;
    let outcome = refreshed_series(&config, args.today).await?;

    let days = args.days.unwrap_or(config.display.recent_days);
    let rows = recent_prices(&outcome.series, days, config.display.units_per_ounce);

    println!("{}: last {} sessions", config.cache.ticker, rows.len());
    println!();
    println!("  {:<12} {:>12} {:>12} {:>10}", "Date", "Close", "Per oz", "Per g");
    println!("  ───────────────────────────────────────────────");
    for row in rows.iter().rev() {
        println!(
            "  {:<12} {:>12.2} {:>12.2} {:>10.2}",
            row.date.to_string(),
            row.close,
            row.per_ounce,
            row.per_gram
        );
    }

    Ok(())
}
