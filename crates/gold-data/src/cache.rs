//! Incrementally refreshed on-disk price cache.
//!
//! [`TimeSeriesCache`] keeps one daily series in a [`CsvStore`] and only asks
//! the upstream provider for the dates after the last stored one. Fetched rows
//! are merged by date (the fetched row wins) and the file is rewritten
//! wholesale. A failed refresh never touches the stored file: a populated
//! cache degrades to its stale series, an empty one reports an error.

use chrono::{Days, NaiveDate};
use gold_core::error::DataError;
use gold_core::traits::PriceProvider;
use gold_core::types::{MergeStats, PriceSeries};
use serde::Serialize;
use std::io::ErrorKind;
use tracing::{debug, info, warn};

use crate::csv_store::CsvStore;

/// First date requested when the cache is empty.
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2004, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// How a refresh ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshStatus {
    /// The series already covered `today`; no upstream call was made.
    Current,
    /// Upstream was queried and its rows merged.
    Refreshed {
        fetched: usize,
        added: usize,
        replaced: usize,
    },
    /// The refresh did not complete; the series may be stale or unsaved.
    Degraded { reason: String },
}

/// Series returned by [`TimeSeriesCache::refresh`] plus its completeness.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshOutcome {
    pub series: PriceSeries,
    pub status: RefreshStatus,
}

impl RefreshOutcome {
    /// False when the caller is looking at a degraded result.
    pub fn is_complete(&self) -> bool {
        !matches!(self.status, RefreshStatus::Degraded { .. })
    }
}

/// Locally persisted daily price series for one ticker.
pub struct TimeSeriesCache<P> {
    store: CsvStore,
    provider: P,
    ticker: String,
    default_start: NaiveDate,
}

impl<P: PriceProvider> TimeSeriesCache<P> {
    /// Create a cache over `store`, refreshed from `provider`.
    pub fn new(store: CsvStore, provider: P, ticker: impl Into<String>) -> Self {
        Self {
            store,
            provider,
            ticker: ticker.into(),
            default_start: default_start_date(),
        }
    }

    /// Override the first date fetched on a cold start.
    pub fn with_default_start(mut self, start: NaiveDate) -> Self {
        self.default_start = start;
        self
    }

    /// Ticker this cache tracks.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// The backing store.
    pub fn store(&self) -> &CsvStore {
        &self.store
    }

    /// Read the persisted series.
    ///
    /// Returns `None` when the store is absent, empty, unparsable or missing a
    /// required column. Callers must then fall back to a full fetch.
    pub fn load(&self) -> Option<PriceSeries> {
        match self.store.read() {
            Ok(series) if series.is_empty() => {
                debug!(path = %self.store.path().display(), "Price store is empty");
                None
            }
            Ok(series) => Some(series),
            Err(DataError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.store.path().display(), "No price store yet");
                None
            }
            Err(e) => {
                warn!(path = %self.store.path().display(), error = %e, "Ignoring unreadable price store");
                None
            }
        }
    }

    /// Fetch one inclusive range from upstream.
    ///
    /// Rows outside `[start, end]` are dropped. An empty answer is fine while
    /// a local series exists; on an empty cache it is `NoDataAvailable`.
    pub async fn fetch_range(&self, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries, DataError> {
        let has_fallback = self.load().is_some();
        self.fetch_checked(start, end, has_fallback).await
    }

    async fn fetch_checked(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        has_fallback: bool,
    ) -> Result<PriceSeries, DataError> {
        if start > end {
            return Err(DataError::InvalidRange { start, end });
        }

        info!(
            ticker = %self.ticker,
            provider = self.provider.name(),
            %start,
            %end,
            "Fetching upstream range"
        );

        let rows = self.provider.fetch_range(&self.ticker, start, end).await?;
        let series: PriceSeries = rows
            .into_iter()
            .filter(|r| r.date >= start && r.date <= end)
            .collect();

        if series.is_empty() {
            if !has_fallback {
                return Err(DataError::NoDataAvailable);
            }
            debug!(ticker = %self.ticker, %start, %end, "Upstream returned no rows");
        }

        Ok(series)
    }

    /// Bring the stored series up to `today`.
    ///
    /// Only `[last stored date + 1, today]` is requested. When the stored
    /// series already reaches `today`, nothing is fetched or written.
    pub async fn refresh(&self, today: NaiveDate) -> Result<RefreshOutcome, DataError> {
        let existing = self.load();

        let start = match existing.as_ref().and_then(|s| s.last_date()) {
            Some(last) => match last.checked_add_days(Days::new(1)) {
                Some(next) if next <= today => next,
                _ => {
                    debug!(ticker = %self.ticker, %last, %today, "Price cache is current");
                    return Ok(RefreshOutcome {
                        series: existing.unwrap_or_default(),
                        status: RefreshStatus::Current,
                    });
                }
            },
            None if self.default_start > today => return Err(DataError::NoDataAvailable),
            None => self.default_start,
        };

        let fetched = match self.fetch_checked(start, today, existing.is_some()).await {
            Ok(fetched) => fetched,
            Err(e) => {
                let Some(series) = existing else {
                    warn!(ticker = %self.ticker, error = %e, "Cold-start fetch failed");
                    return Err(e);
                };
                warn!(ticker = %self.ticker, error = %e, "Refresh failed, serving stale series");
                return Ok(RefreshOutcome {
                    series,
                    status: RefreshStatus::Degraded {
                        reason: e.to_string(),
                    },
                });
            }
        };

        let fetched_rows = fetched.len();
        let mut series = existing.unwrap_or_default();
        let stats: MergeStats = series.merge(fetched);
        let status = RefreshStatus::Refreshed {
            fetched: fetched_rows,
            added: stats.added,
            replaced: stats.replaced,
        };

        if stats.is_noop() {
            return Ok(RefreshOutcome { series, status });
        }

        if let Err(e) = self.store.write(&series) {
            warn!(
                path = %self.store.path().display(),
                error = %e,
                "Failed to persist refreshed series"
            );
            return Ok(RefreshOutcome {
                series,
                status: RefreshStatus::Degraded {
                    reason: format!("refreshed series not saved: {}", e),
                },
            });
        }

        info!(
            ticker = %self.ticker,
            added = stats.added,
            replaced = stats.replaced,
            rows = series.len(),
            "Price cache refreshed"
        );

        Ok(RefreshOutcome { series, status })
    }
}
