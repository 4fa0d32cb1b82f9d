//! Descriptive statistics and history views for the analysis pages.

mod report;
mod statistics;
mod views;

pub use report::{AnalysisReport, RangeView};
pub use statistics::{describe, ColumnStats, Overview, Summary};
pub use views::{filter_range, recent_prices, resample, RecentPrice, GRAMS_PER_OUNCE};
