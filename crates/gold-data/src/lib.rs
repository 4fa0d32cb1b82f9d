//! Price data sources and the local price cache.

mod cache;
mod csv_store;
mod yahoo;

pub use cache::{default_start_date, RefreshOutcome, RefreshStatus, TimeSeriesCache};
pub use csv_store::CsvStore;
pub use yahoo::{YahooConfig, YahooProvider, DEFAULT_BASE_URL};
