//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, CacheSettings, DisplaySettings, ForecastSettings, LoggingConfig,
    ProviderSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables use the `GOLD` prefix and `__` as the section
/// separator, e.g. `GOLD__CACHE__TICKER=GLD`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("GOLD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("gold.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
            [cache]
            path = "data/XAU_gold_data.csv"
            delimiter = ";"
            start_date = "2010-01-01"

            [forecast]
            fixed_rate = "1350.5"
            "#,
        );

        let config = load_config(&path).unwrap();

        assert_eq!(config.cache.path, "data/XAU_gold_data.csv");
        assert_eq!(config.cache.delimiter_byte(), Some(b';'));
        assert_eq!(config.cache.ticker, "GC=F");
        assert_eq!(config.cache.start_date, NaiveDate::from_ymd_opt(2010, 1, 1).unwrap());
        assert_eq!(config.forecast.fixed_rate, Some(dec!(1350.5)));
        assert_eq!(config.forecast.target_currency, "KRW");
        assert_eq!(config.display.recent_days, 5);
        assert_eq!(config.logging.level, "info");
        config.validate().unwrap();
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.validate().unwrap();

        config.cache.delimiter = '→';
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.forecast.fixed_rate = Some(dec!(-1));
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.display.recent_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_renders_as_toml() {
        let rendered = AppConfig::default().to_toml().unwrap();

        assert!(rendered.contains("[cache]"));
        assert!(rendered.contains("ticker = \"GC=F\""));
        assert!(!rendered.contains("fixed_rate"));
    }
}
