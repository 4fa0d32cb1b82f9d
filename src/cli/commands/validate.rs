//! Validate configuration command.

use anyhow::Result;
use gold_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Ticker: {}", config.cache.ticker);
    println!("Cache file: {}", config.cache.path);
    println!("Cold-start date: {}", config.cache.start_date);
    println!("Model: {}", config.forecast.model_path);
    match config.forecast.fixed_rate {
        Some(rate) => println!(
            "Rate: 1 {} = {} {}",
            config.forecast.source_currency, rate, config.forecast.target_currency
        ),
        None => println!("Rate: not configured"),
    }
    println!();
    print!("{}", config.to_toml()?);

    Ok(())
}
