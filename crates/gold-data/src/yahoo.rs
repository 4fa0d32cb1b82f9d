//! Yahoo Finance chart API provider.

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate};
use gold_core::error::DataError;
use gold_core::traits::PriceProvider;
use gold_core::types::PriceRecord;
use reqwest::{header, Client};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Default chart API host.
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Decimal places kept when converting provider floats.
const PRICE_DP: u32 = 4;

/// Yahoo provider configuration.
#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: "Mozilla/5.0 (compatible; gold-dashboard)".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Daily bars from the Yahoo Finance chart endpoint.
pub struct YahooProvider {
    config: YahooConfig,
    client: Client,
}

impl YahooProvider {
    /// Create a new provider client.
    pub fn new(config: YahooConfig) -> Result<Self, DataError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)
                .map_err(|e| DataError::Internal(e.to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| DataError::Internal(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn chart_url(&self, ticker: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}",
            self.config.base_url.trim_end_matches('/'),
            ticker
        )
    }
}

#[async_trait]
impl PriceProvider for YahooProvider {
    async fn fetch_range(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceRecord>, DataError> {
        // period2 is exclusive
        let period1 = start.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp());
        let period2 = end
            .checked_add_days(Days::new(1))
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp());
        let (Some(period1), Some(period2)) = (period1, period2) else {
            return Err(DataError::InvalidRange { start, end });
        };

        let params = [
            ("period1", period1.to_string()),
            ("period2", period2.to_string()),
            ("interval", "1d".to_string()),
            ("events", "history".to_string()),
        ];

        debug!(ticker, %start, %end, "Requesting Yahoo chart");

        let resp = self
            .client
            .get(self.chart_url(ticker))
            .query(&params)
            .send()
            .await
            .map_err(|e| DataError::Upstream(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| DataError::Upstream(e.to_string()))?;

        // Error bodies carry a chart.error object; prefer its description
        if !status.is_success() {
            let detail = serde_json::from_str::<ChartResponse>(&text)
                .ok()
                .and_then(|r| r.chart.error)
                .map(|e| format!("{}: {}", e.code, e.description))
                .unwrap_or(text);
            return Err(DataError::Upstream(format!("{}: {}", status, detail)));
        }

        let records = parse_chart(&text)?;
        info!(ticker, %start, %end, rows = records.len(), "Fetched Yahoo chart");
        Ok(records)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

/// Convert a chart API body into daily records, skipping incomplete rows.
fn parse_chart(body: &str) -> Result<Vec<PriceRecord>, DataError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| DataError::Upstream(format!("bad chart body: {}", e)))?;

    if let Some(err) = response.chart.error {
        return Err(DataError::Upstream(format!("{}: {}", err.code, err.description)));
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let offset = result.meta.gmtoffset;

    let records = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let date = DateTime::from_timestamp(ts + offset, 0)?.date_naive();
            Some(PriceRecord::new(
                date,
                price_at(&quote.open, i)?,
                price_at(&quote.high, i)?,
                price_at(&quote.low, i)?,
                price_at(&quote.close, i)?,
            ))
        })
        .collect();

    Ok(records)
}

fn price_at(column: &[Option<f64>], i: usize) -> Option<Decimal> {
    let value = (*column.get(i)?)?;
    Decimal::try_from(value).ok().map(|d| d.round_dp(PRICE_DP))
}
