//! CLI command implementations.

pub mod analyze;
pub mod home;
pub mod predict;
pub mod refresh;
pub mod validate;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use gold_config::{load_config, AppConfig};
use gold_data::{CsvStore, RefreshOutcome, RefreshStatus, TimeSeriesCache, YahooConfig, YahooProvider};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Load and validate the configuration file.
pub fn load_settings(config_path: &Path) -> Result<AppConfig> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Build the price cache described by the configuration.
pub fn build_cache(config: &AppConfig) -> Result<TimeSeriesCache<YahooProvider>> {
    let delimiter = config
        .cache
        .delimiter_byte()
        .context("cache.delimiter must be a single ASCII character")?;
    let store = CsvStore::new(&config.cache.path).with_delimiter(delimiter);

    let provider = YahooProvider::new(YahooConfig {
        base_url: config.provider.base_url.clone(),
        timeout: Duration::from_secs(config.provider.timeout_secs),
        user_agent: config.provider.user_agent.clone(),
    })
    .context("Failed to create price provider")?;

    Ok(TimeSeriesCache::new(store, provider, config.cache.ticker.clone())
        .with_default_start(config.cache.start_date))
}

/// Refresh the cache and report a degraded result to the user.
///
/// Fails only when there is nothing to show: the store was empty and the
/// upstream fetch did not succeed.
pub async fn refreshed_series(config: &AppConfig, today: Option<NaiveDate>) -> Result<RefreshOutcome> {
    let cache = build_cache(config)?;
    let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());

    info!(ticker = %cache.ticker(), %today, "Refreshing price cache");
    let outcome = cache.refresh(today).await.with_context(|| {
        format!(
            "No price data available for {}: the local cache at {} is empty and the download failed",
            cache.ticker(),
            cache.store().path().display()
        )
    })?;

    if let RefreshStatus::Degraded { reason } = &outcome.status {
        warn!(%reason, "Showing cached prices");
        eprintln!("Warning: prices may be out of date ({})", reason);
    }

    Ok(outcome)
}
