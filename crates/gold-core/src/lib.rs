//! Core types and traits for the gold price dashboard.
//!
//! This crate provides the foundational building blocks including:
//! - Daily price data types (PriceRecord, PriceSeries)
//! - Aggregation periods used by the analysis pages
//! - The error taxonomy shared by the cache, analysis and forecast layers
//! - The upstream market-data provider trait

pub mod types;
pub mod traits;
pub mod error;

pub use error::{DashboardError, DashboardResult};
pub use types::*;
pub use traits::*;
