//! Core traits for the gold dashboard.

mod provider;

pub use provider::PriceProvider;
