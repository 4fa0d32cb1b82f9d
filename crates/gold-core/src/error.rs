//! Error types for the gold dashboard.

use chrono::NaiveDate;
use thiserror::Error;

/// Top-level dashboard error.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Price cache and upstream provider errors.
#[derive(Error, Debug)]
pub enum DataError {
    /// The local store exists but cannot be used. `load` absorbs this into an
    /// empty result; it only surfaces from lower-level store calls.
    #[error("Store unreadable: {0}")]
    StoreUnreadable(String),

    /// The market-data provider failed (network, HTTP status, error body).
    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data error: {0}")]
    Internal(String),
}

/// Errors raised while computing page statistics.
#[derive(Error, Debug, PartialEq)]
pub enum AnalysisError {
    #[error("Start date {start} must not be after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Price series is empty")]
    EmptySeries,
}

/// Forecast model and currency conversion errors.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Model file not found: {0}")]
    ModelNotFound(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Missing feature: {0}")]
    MissingFeature(String),

    #[error("Exchange rate unavailable: {0}")]
    RateUnavailable(String),
}

/// Result type alias for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;
