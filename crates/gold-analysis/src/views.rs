//! Period, range and recent-price views.

use chrono::NaiveDate;
use gold_core::error::AnalysisError;
use gold_core::types::{Period, PriceRecord, PriceSeries};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Grams in one troy ounce, as used for the per-gram price.
pub const GRAMS_PER_OUNCE: Decimal = dec!(31.1);

/// Resample a daily series to `period`.
///
/// Each bucket keeps its last record, dated at the bucket's calendar end.
/// `Period::Daily` returns the series unchanged.
pub fn resample(series: &PriceSeries, period: Period) -> PriceSeries {
    if period == Period::Daily {
        return series.clone();
    }

    let mut buckets: Vec<PriceRecord> = Vec::new();
    for record in series {
        let end = period.bucket_end(record.date);
        match buckets.last_mut() {
            Some(last) if last.date == end => *last = record.with_date(end),
            _ => buckets.push(record.with_date(end)),
        }
    }
    PriceSeries::from_records(buckets)
}

/// Inclusive date-range slice of `series`.
///
/// An empty slice is not an error; callers decide how to present it.
pub fn filter_range(
    series: &PriceSeries,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceSeries, AnalysisError> {
    if start > end {
        return Err(AnalysisError::InvalidRange { start, end });
    }
    Ok(series.between(start, end))
}

/// One row of the recent-prices table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPrice {
    pub date: NaiveDate,
    /// Close as quoted by the provider
    pub close: Decimal,
    /// Close scaled to one troy ounce
    pub per_ounce: Decimal,
    /// Close scaled to one gram
    pub per_gram: Decimal,
}

/// The last `n` closes with per-ounce and per-gram prices.
///
/// `units_per_ounce` converts one quoted unit to an ounce: 1 for futures quoted
/// per ounce, 10 for a fund share worth a tenth of an ounce.
pub fn recent_prices(series: &PriceSeries, n: usize, units_per_ounce: Decimal) -> Vec<RecentPrice> {
    series
        .last_n(n)
        .iter()
        .map(|r| {
            let per_ounce = r.close * units_per_ounce;
            RecentPrice {
                date: r.date,
                close: r.close,
                per_ounce,
                per_gram: (per_ounce / GRAMS_PER_OUNCE).round_dp(2),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, close: Decimal) -> PriceRecord {
        PriceRecord::new(date, close, close, close, close)
    }

    fn sample() -> PriceSeries {
        PriceSeries::from_records(vec![
            record(date(2024, 1, 30), dec!(2030)),
            record(date(2024, 1, 31), dec!(2040)),
            record(date(2024, 2, 1), dec!(2050)),
            record(date(2024, 3, 28), dec!(2200)),
            record(date(2024, 4, 2), dec!(2250)),
            record(date(2025, 1, 3), dec!(2650)),
        ])
    }

    #[test]
    fn test_resample_monthly_keeps_last_close_per_month() {
        let monthly = resample(&sample(), Period::Monthly);

        let rows: Vec<(NaiveDate, Decimal)> = monthly.iter().map(|r| (r.date, r.close)).collect();
        assert_eq!(
            rows,
            vec![
                (date(2024, 1, 31), dec!(2040)),
                (date(2024, 2, 29), dec!(2050)),
                (date(2024, 3, 31), dec!(2200)),
                (date(2024, 4, 30), dec!(2250)),
                (date(2025, 1, 31), dec!(2650)),
            ]
        );
    }

    #[test]
    fn test_resample_quarterly_and_yearly() {
        let quarterly = resample(&sample(), Period::Quarterly);
        assert_eq!(quarterly.len(), 3);
        assert_eq!(quarterly.get(date(2024, 3, 31)).unwrap().close, dec!(2200));

        let yearly = resample(&sample(), Period::Yearly);
        assert_eq!(yearly.len(), 2);
        assert_eq!(yearly.get(date(2024, 12, 31)).unwrap().close, dec!(2250));
    }

    #[test]
    fn test_resample_daily_is_identity() {
        assert_eq!(resample(&sample(), Period::Daily), sample());
    }

    #[test]
    fn test_filter_range() {
        let slice = filter_range(&sample(), date(2024, 1, 31), date(2024, 3, 28)).unwrap();
        assert_eq!(slice.len(), 3);

        let empty = filter_range(&sample(), date(2023, 1, 1), date(2023, 12, 31)).unwrap();
        assert!(empty.is_empty());

        assert_eq!(
            filter_range(&sample(), date(2024, 3, 1), date(2024, 2, 1)),
            Err(AnalysisError::InvalidRange {
                start: date(2024, 3, 1),
                end: date(2024, 2, 1)
            })
        );
    }

    #[test]
    fn test_recent_prices_unit_conversion() {
        let rows = recent_prices(&sample(), 2, dec!(10));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, date(2024, 4, 2));
        assert_eq!(rows[1].per_ounce, dec!(26500));
        assert_eq!(rows[1].per_gram, dec!(852.09));
    }
}
