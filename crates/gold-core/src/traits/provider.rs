//! Upstream market-data provider trait.

use crate::error::DataError;
use crate::types::PriceRecord;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

/// Source of historical daily prices.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch daily records for one inclusive date range.
    ///
    /// # Arguments
    /// * `ticker` - The instrument to fetch (e.g. `GC=F`)
    /// * `start` - First date of the range
    /// * `end` - Last date of the range
    ///
    /// # Returns
    /// Whatever rows the provider has. Non-trading days are simply absent and
    /// an empty vector is a valid answer; `Err` means the call itself failed.
    async fn fetch_range(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceRecord>, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

#[async_trait]
impl<P: PriceProvider + ?Sized> PriceProvider for Arc<P> {
    async fn fetch_range(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceRecord>, DataError> {
        (**self).fetch_range(ticker, start, end).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
