//! Configuration structures.

use chrono::NaiveDate;
use gold_core::error::DashboardError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub forecast: ForecastSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "gold-dashboard".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Local price cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Path of the delimited price file
    pub path: String,
    /// Instrument tracked by the cache
    pub ticker: String,
    /// First date fetched when the cache is empty
    pub start_date: NaiveDate,
    /// Field delimiter of the price file
    pub delimiter: char,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            path: "data/gold_prices.csv".to_string(),
            ticker: "GC=F".to_string(),
            start_date: NaiveDate::from_ymd_opt(2004, 1, 1).unwrap_or_default(),
            delimiter: ',',
        }
    }
}

impl CacheSettings {
    /// Delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Option<u8> {
        u8::try_from(self.delimiter).ok().filter(|b| b.is_ascii())
    }
}

/// Upstream market-data provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (compatible; gold-dashboard)".to_string(),
        }
    }
}

/// Forecast page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    /// Serialized linear model (JSON)
    pub model_path: String,
    /// Currency the model predicts in
    pub source_currency: String,
    /// Currency shown next to the prediction
    pub target_currency: String,
    /// Units of target per unit of source; unset disables conversion
    pub fixed_rate: Option<Decimal>,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            model_path: "model/linear_model.json".to_string(),
            source_currency: "USD".to_string(),
            target_currency: "KRW".to_string(),
            fixed_rate: None,
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Rows in the recent-prices table
    pub recent_days: usize,
    /// Quoted units per troy ounce (1 for futures, 10 for a tenth-ounce share)
    pub units_per_ounce: Decimal,
    /// History rows printed on the analysis page
    pub history_rows: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            recent_days: 5,
            units_per_ounce: Decimal::ONE,
            history_rows: 20,
        }
    }
}

impl AppConfig {
    /// Check values the deserializer cannot.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.cache.ticker.trim().is_empty() {
            return Err(DashboardError::Config("cache.ticker must not be empty".into()));
        }
        if self.cache.delimiter_byte().is_none() {
            return Err(DashboardError::Config(format!(
                "cache.delimiter must be a single ASCII character, got {:?}",
                self.cache.delimiter
            )));
        }
        if self.provider.timeout_secs == 0 {
            return Err(DashboardError::Config("provider.timeout_secs must be positive".into()));
        }
        if self.display.recent_days == 0 {
            return Err(DashboardError::Config("display.recent_days must be positive".into()));
        }
        if self.display.units_per_ounce <= Decimal::ZERO {
            return Err(DashboardError::Config("display.units_per_ounce must be positive".into()));
        }
        if matches!(self.forecast.fixed_rate, Some(rate) if rate <= Decimal::ZERO) {
            return Err(DashboardError::Config("forecast.fixed_rate must be positive".into()));
        }
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, DashboardError> {
        toml::to_string_pretty(self).map_err(|e| DashboardError::Serialization(e.to_string()))
    }
}
