//! Next-day close forecasting with optional currency conversion.
//!
//! The model and the exchange-rate source are opaque capabilities; either may
//! fail. A model failure aborts the prediction, a missing rate only drops the
//! converted price.

mod model;
mod rates;

pub use model::{Features, Forecaster, LinearModel};
pub use rates::{FixedRate, RateSource};

use gold_core::error::ForecastError;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

/// Result of a forecast request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Predicted close in the quote currency
    pub predicted: Decimal,
    pub source_currency: String,
    pub target_currency: String,
    /// Predicted close in the target currency, when a rate was available
    pub converted: Option<Decimal>,
    /// Why the conversion is missing
    pub conversion_error: Option<String>,
}

/// Predict the next close and convert it to `target`.
pub async fn predict_next_close(
    model: &dyn Forecaster,
    rates: &dyn RateSource,
    features: &Features,
    source: &str,
    target: &str,
) -> Result<Prediction, ForecastError> {
    let raw = model.predict(features)?;
    let predicted = Decimal::try_from(raw)
        .map_err(|e| ForecastError::InvalidModel(format!("prediction {}: {}", raw, e)))?
        .round_dp(2);

    let converted = rates.rate(source, target).await.and_then(|rate| {
        predicted.checked_mul(rate).map(|v| v.round_dp(2)).ok_or_else(|| {
            ForecastError::RateUnavailable(format!(
                "{} {} does not fit in {}",
                predicted, source, target
            ))
        })
    });

    let (converted, conversion_error) = match converted {
        Ok(value) => (Some(value), None),
        Err(e) => {
            warn!(source, target, error = %e, "Currency conversion unavailable");
            (None, Some(e.to_string()))
        }
    };

    Ok(Prediction {
        predicted,
        source_currency: source.to_string(),
        target_currency: target.to_string(),
        converted,
        conversion_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    struct BrokenModel;

    impl Forecaster for BrokenModel {
        fn predict(&self, _features: &Features) -> Result<f64, ForecastError> {
            Err(ForecastError::InvalidModel("weights corrupted".to_string()))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    fn model() -> LinearModel {
        LinearModel {
            intercept: 5.0,
            coefficients: BTreeMap::from([("open".to_string(), 1.0)]),
        }
    }

    fn features() -> Features {
        Features {
            open: 1800.0,
            high: 1810.0,
            low: 1790.0,
            volume: 10000.0,
        }
    }

    #[tokio::test]
    async fn test_prediction_with_conversion() {
        let rates = FixedRate::new("USD", "KRW", Some(dec!(1300)));

        let p = predict_next_close(&model(), &rates, &features(), "USD", "KRW")
            .await
            .unwrap();

        assert_eq!(p.predicted, dec!(1805));
        assert_eq!(p.converted, Some(dec!(2346500)));
        assert!(p.conversion_error.is_none());
    }

    #[tokio::test]
    async fn test_missing_rate_degrades_to_unconverted_prediction() {
        let rates = FixedRate::new("USD", "KRW", None);

        let p = predict_next_close(&model(), &rates, &features(), "USD", "KRW")
            .await
            .unwrap();

        assert_eq!(p.predicted, dec!(1805));
        assert_eq!(p.converted, None);
        assert!(p.conversion_error.unwrap().contains("USD/KRW"));
    }

    #[tokio::test]
    async fn test_overflowing_conversion_is_unavailable() {
        let huge = LinearModel {
            intercept: 1e20,
            coefficients: BTreeMap::from([("open".to_string(), 0.0)]),
        };
        let rates = FixedRate::new("USD", "KRW", Some(dec!(100000000000000000000)));

        let p = predict_next_close(&huge, &rates, &features(), "USD", "KRW")
            .await
            .unwrap();

        assert_eq!(p.predicted, dec!(100000000000000000000));
        assert_eq!(p.converted, None);
        assert!(p.conversion_error.unwrap().contains("does not fit"));
    }

    #[tokio::test]
    async fn test_model_failure_is_error() {
        let rates = FixedRate::new("USD", "KRW", Some(dec!(1300)));

        let result = predict_next_close(&BrokenModel, &rates, &features(), "USD", "KRW").await;

        assert!(matches!(result, Err(ForecastError::InvalidModel(_))));
    }
}
