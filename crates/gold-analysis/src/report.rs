//! Analysis report generation.

use chrono::NaiveDate;
use gold_core::error::AnalysisError;
use gold_core::types::{Period, PriceRecord, PriceSeries};
use serde::{Deserialize, Serialize};

use crate::statistics::{describe, Overview, Summary};
use crate::views::{filter_range, resample};

/// Rows of a user-selected date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeView {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub rows: Vec<PriceRecord>,
}

/// Complete analysis page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Instrument the series belongs to
    pub ticker: String,
    /// Headline numbers
    pub overview: Overview,
    /// Column statistics
    pub summary: Summary,
    /// Aggregation used for the history table
    pub period: Period,
    /// Resampled history, oldest first
    pub history: Vec<PriceRecord>,
    /// Optional date-range selection
    pub range: Option<RangeView>,
    /// Maximum history rows printed by `summary()`
    #[serde(skip)]
    row_limit: usize,
}

impl AnalysisReport {
    /// Build the report for a non-empty series.
    pub fn new(ticker: &str, series: &PriceSeries, period: Period) -> Result<Self, AnalysisError> {
        Ok(Self {
            ticker: ticker.to_string(),
            overview: Overview::from_series(series)?,
            summary: describe(series)?,
            period,
            history: resample(series, period).into_records(),
            range: None,
            row_limit: 20,
        })
    }

    /// Attach an inclusive date-range selection.
    pub fn with_range(
        mut self,
        series: &PriceSeries,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, AnalysisError> {
        let rows = filter_range(series, start, end)?.into_records();
        self.range = Some(RangeView { start, end, rows });
        Ok(self)
    }

    /// Limit the number of history rows in the text summary.
    pub fn with_row_limit(mut self, limit: usize) -> Self {
        self.row_limit = limit;
        self
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str(&format!("                 PRICE ANALYSIS: {:<10}\n", self.ticker));
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("OVERVIEW\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Period:              {} ~ {}\n",
            self.overview.first_date, self.overview.last_date
        ));
        s.push_str(&format!(
            "  Trading Days:        {}\n",
            self.overview.trading_days
        ));
        s.push_str(&format!(
            "  Calendar Days:       {}\n",
            self.overview.calendar_days
        ));
        s.push_str(&format!(
            "  Latest Close:        ${:.2}\n",
            self.overview.latest_close
        ));
        s.push_str(&format!(
            "  Mean Close:          ${:.2}\n",
            self.overview.mean_close
        ));
        s.push_str(&format!(
            "  Max Close:           ${:.2}\n",
            self.overview.max_close
        ));
        s.push('\n');

        s.push_str("STATISTICS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  {:<6} {:>6} {:>10} {:>9} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
            "", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        ));
        for c in &self.summary.columns {
            let std = c
                .std
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "n/a".to_string());
            s.push_str(&format!(
                "  {:<6} {:>6} {:>10.2} {:>9} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}\n",
                c.field.header(),
                c.count,
                c.mean,
                std,
                c.min,
                c.p25,
                c.p50,
                c.p75,
                c.max
            ));
        }
        s.push('\n');

        s.push_str(&format!("HISTORY ({})\n", self.period));
        s.push_str("───────────────────────────────────────────────────────────\n");
        let skip = self.history.len().saturating_sub(self.row_limit);
        if skip > 0 {
            s.push_str(&format!("  ... {} earlier rows\n", skip));
        }
        for r in self.history.iter().skip(skip) {
            s.push_str(&format_row(r));
        }

        if let Some(range) = &self.range {
            s.push('\n');
            s.push_str(&format!("RANGE {} ~ {}\n", range.start, range.end));
            s.push_str("───────────────────────────────────────────────────────────\n");
            if range.rows.is_empty() {
                s.push_str("  No data for the selected range.\n");
            }
            for r in &range.rows {
                s.push_str(&format_row(r));
            }
        }

        s
    }

    /// Serialize the report to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn format_row(r: &PriceRecord) -> String {
    format!(
        "  {}  O ${:>10.2}  H ${:>10.2}  L ${:>10.2}  C ${:>10.2}\n",
        r.date, r.open, r.high, r.low, r.close
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> PriceSeries {
        (1..=28)
            .map(|d| {
                let date = NaiveDate::from_ymd_opt(2024, 2, d).unwrap();
                let close = dec!(2000) + rust_decimal::Decimal::from(d);
                PriceRecord::new(date, close, close + dec!(3), close - dec!(3), close)
            })
            .collect()
    }

    #[test]
    fn test_report_summary_sections() {
        let report = AnalysisReport::new("GC=F", &sample(), Period::Daily)
            .unwrap()
            .with_row_limit(5);

        let text = report.summary();

        assert!(text.contains("PRICE ANALYSIS: GC=F"));
        assert!(text.contains("Trading Days:        28"));
        assert!(text.contains("Latest Close:        $2028.00"));
        assert!(text.contains("... 23 earlier rows"));
        assert!(text.contains("2024-02-28"));
        assert!(!text.contains("RANGE"));
    }

    #[test]
    fn test_report_with_empty_range_says_so() {
        let series = sample();
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();

        let report = AnalysisReport::new("GC=F", &series, Period::Monthly)
            .unwrap()
            .with_range(&series, start, end)
            .unwrap();

        assert_eq!(report.history.len(), 1);
        assert!(report.summary().contains("No data for the selected range."));
    }

    #[test]
    fn test_report_rejects_inverted_range() {
        let series = sample();
        let start = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        let result = AnalysisReport::new("GC=F", &series, Period::Daily)
            .unwrap()
            .with_range(&series, start, end);

        assert!(matches!(result, Err(AnalysisError::InvalidRange { .. })));
    }

    #[test]
    fn test_report_json() {
        let report = AnalysisReport::new("GC=F", &sample(), Period::Daily).unwrap();

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["ticker"], "GC=F");
        assert_eq!(json["period"], "daily");
        assert_eq!(json["history"].as_array().unwrap().len(), 28);
        assert_eq!(json["overview"]["trading_days"], 28);
    }
}
