//! Core data types for the gold dashboard.

mod period;
mod price;

pub use period::Period;
pub use price::{MergeStats, PriceField, PriceRecord, PriceSeries};
