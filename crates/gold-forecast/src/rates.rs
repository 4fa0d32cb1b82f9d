//! Currency conversion interface.

use async_trait::async_trait;
use gold_core::error::ForecastError;
use rust_decimal::Decimal;

/// Source of exchange rates.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Units of `to` per unit of `from`.
    async fn rate(&self, from: &str, to: &str) -> Result<Decimal, ForecastError>;
}

/// A single configured rate. Unconfigured pairs are unavailable.
#[derive(Debug, Clone)]
pub struct FixedRate {
    from: String,
    to: String,
    rate: Option<Decimal>,
}

impl FixedRate {
    /// Rate for `from -> to`; `None` means conversion is not configured.
    pub fn new(from: impl Into<String>, to: impl Into<String>, rate: Option<Decimal>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            rate,
        }
    }
}

#[async_trait]
impl RateSource for FixedRate {
    async fn rate(&self, from: &str, to: &str) -> Result<Decimal, ForecastError> {
        if from.eq_ignore_ascii_case(to) {
            return Ok(Decimal::ONE);
        }

        let forward = self.from.eq_ignore_ascii_case(from) && self.to.eq_ignore_ascii_case(to);
        let inverse = self.from.eq_ignore_ascii_case(to) && self.to.eq_ignore_ascii_case(from);

        match self.rate {
            Some(rate) if rate > Decimal::ZERO && forward => Ok(rate),
            Some(rate) if rate > Decimal::ZERO && inverse => {
                Decimal::ONE.checked_div(rate).ok_or_else(|| {
                    ForecastError::RateUnavailable(format!("{}/{} out of range", from, to))
                })
            }
            Some(_) if forward || inverse => Err(ForecastError::RateUnavailable(format!(
                "non-positive rate configured for {}/{}",
                from, to
            ))),
            _ => Err(ForecastError::RateUnavailable(format!(
                "no rate configured for {}/{}",
                from, to
            ))),
        }
    }
}
