//! Descriptive statistics over a price series.

use chrono::NaiveDate;
use gold_core::error::AnalysisError;
use gold_core::types::{PriceField, PriceSeries};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline numbers shown at the top of the analysis page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    /// First date in the series
    pub first_date: NaiveDate,
    /// Last date in the series
    pub last_date: NaiveDate,
    /// Number of records (trading days)
    pub trading_days: usize,
    /// Calendar days covered, both ends included
    pub calendar_days: i64,
    /// Most recent close
    pub latest_close: Decimal,
    /// Mean close over the whole series
    pub mean_close: Decimal,
    /// Highest close over the whole series
    pub max_close: Decimal,
}

impl Overview {
    /// Compute the overview for a non-empty series.
    pub fn from_series(series: &PriceSeries) -> Result<Self, AnalysisError> {
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return Err(AnalysisError::EmptySeries);
        };

        let closes = series.closes();
        let total: Decimal = closes.iter().copied().sum();
        let max_close = closes.iter().copied().max().unwrap_or(last.close);

        Ok(Self {
            first_date: first.date,
            last_date: last.date,
            trading_days: series.len(),
            calendar_days: (last.date - first.date).num_days() + 1,
            latest_close: last.close,
            mean_close: total / Decimal::from(closes.len()),
            max_close,
        })
    }
}

/// Distribution of one price column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub field: PriceField,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` below two observations
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl ColumnStats {
    fn from_values(field: PriceField, mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.total_cmp(b));

        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let std = (n > 1).then(|| {
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            variance.sqrt()
        });

        Some(Self {
            field,
            count: n,
            mean,
            std,
            min: values[0],
            p25: quantile(&values, 0.25),
            p50: quantile(&values, 0.50),
            p75: quantile(&values, 0.75),
            max: values[n - 1],
        })
    }
}

/// Linear interpolation between the closest ranks of a sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Per-column statistics for Open, High, Low and Close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub columns: Vec<ColumnStats>,
}

impl Summary {
    /// Statistics for one column.
    pub fn column(&self, field: PriceField) -> Option<&ColumnStats> {
        self.columns.iter().find(|c| c.field == field)
    }
}

/// Describe every price column of `series`.
pub fn describe(series: &PriceSeries) -> Result<Summary, AnalysisError> {
    let columns = PriceField::ALL
        .iter()
        .filter_map(|&field| {
            let values = series
                .column(field)
                .iter()
                .filter_map(|d| d.to_f64())
                .collect();
            ColumnStats::from_values(field, values)
        })
        .collect::<Vec<_>>();

    if columns.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }
    Ok(Summary { columns })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gold_core::types::PriceRecord;
    use rust_decimal_macros::dec;

    fn series(closes: &[Decimal]) -> PriceSeries {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64);
                PriceRecord::new(date, c, c + dec!(1), c - dec!(1), c)
            })
            .collect()
    }

    #[test]
    fn test_describe_matches_linear_quantiles() {
        let s = series(&[dec!(1), dec!(2), dec!(3), dec!(4)]);

        let summary = describe(&s).unwrap();
        let close = summary.column(PriceField::Close).unwrap();

        assert_eq!(close.count, 4);
        assert!((close.mean - 2.5).abs() < 1e-9);
        assert!((close.std.unwrap() - 1.2909944).abs() < 1e-6);
        assert!((close.min - 1.0).abs() < 1e-9);
        assert!((close.p25 - 1.75).abs() < 1e-9);
        assert!((close.p50 - 2.5).abs() < 1e-9);
        assert!((close.p75 - 3.25).abs() < 1e-9);
        assert!((close.max - 4.0).abs() < 1e-9);

        let high = summary.column(PriceField::High).unwrap();
        assert!((high.mean - 3.5).abs() < 1e-9);
        assert_eq!(summary.columns.len(), 4);
    }

    #[test]
    fn test_describe_single_row_has_no_std() {
        let summary = describe(&series(&[dec!(2000)])).unwrap();
        let close = summary.column(PriceField::Close).unwrap();

        assert_eq!(close.std, None);
        assert!((close.p75 - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_describe_empty_series_is_error() {
        assert_eq!(describe(&PriceSeries::new()), Err(AnalysisError::EmptySeries));
    }

    #[test]
    fn test_overview() {
        let s = series(&[dec!(2000), dec!(2100), dec!(2050)]);

        let overview = Overview::from_series(&s).unwrap();

        assert_eq!(overview.trading_days, 3);
        assert_eq!(overview.calendar_days, 3);
        assert_eq!(overview.latest_close, dec!(2050));
        assert_eq!(overview.mean_close, dec!(2050));
        assert_eq!(overview.max_close, dec!(2100));
        assert_eq!(overview.first_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_overview_empty_series_is_error() {
        assert_eq!(
            Overview::from_series(&PriceSeries::new()),
            Err(AnalysisError::EmptySeries)
        );
    }
}
