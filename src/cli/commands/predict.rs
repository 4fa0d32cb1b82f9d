//! Predict command implementation.

use anyhow::Result;
use gold_forecast::{predict_next_close, FixedRate, Features, Forecaster, LinearModel};
use std::path::{Path, PathBuf};
use tracing::info;

use super::load_settings;
use crate::cli::{OutputFormat, PredictArgs};

pub async fn run(args: PredictArgs, config_path: &Path) -> Result<()> {
    let config = load_settings(config_path)?;
    let forecast = &config.forecast;

    let model_path = args
        .model
        .clone()
        .unwrap_or_else(|| PathBuf::from(&forecast.model_path));
    let model = LinearModel::load(&model_path)?;
    info!(model = model.name(), path = %model_path.display(), "Model ready");

    let rates = FixedRate::new(
        forecast.source_currency.clone(),
        forecast.target_currency.clone(),
        forecast.fixed_rate,
    );
    let features = Features {
        open: args.open,
        high: args.high,
        low: args.low,
        volume: args.volume,
    };

    let prediction = predict_next_close(
        &model,
        &rates,
        &features,
        &forecast.source_currency,
        &forecast.target_currency,
    )
    .await?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&prediction)?),
        OutputFormat::Text => {
            println!(
                "Predicted close: {:.2} {}",
                prediction.predicted, prediction.source_currency
            );
            match (&prediction.converted, &prediction.conversion_error) {
                (Some(converted), _) => {
                    println!("Converted:       {:.2} {}", converted, prediction.target_currency)
                }
                (None, Some(reason)) => println!(
                    "Converted:       unavailable ({})",
                    reason
                ),
                (None, None) => {}
            }
        }
    }

    Ok(())
}
