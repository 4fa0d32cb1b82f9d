//! Aggregation periods for the price history views.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bucket size used when resampling a daily series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// One bucket per trading day (no resampling)
    #[default]
    Daily,
    /// Calendar months
    Monthly,
    /// Calendar quarters
    Quarterly,
    /// Calendar years
    Yearly,
}

impl Period {
    /// Last calendar day of the bucket containing `date`.
    pub fn bucket_end(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Period::Daily => date,
            Period::Monthly => month_end(date.year(), date.month()),
            Period::Quarterly => {
                let last_month = ((date.month() - 1) / 3 + 1) * 3;
                month_end(date.year(), last_month)
            }
            Period::Yearly => month_end(date.year(), 12),
        }
    }
}

fn month_end(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Period::Daily => "daily",
            Period::Monthly => "monthly",
            Period::Quarterly => "quarterly",
            Period::Yearly => "yearly",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "d" | "day" | "daily" => Ok(Period::Daily),
            "m" | "month" | "monthly" => Ok(Period::Monthly),
            "q" | "quarter" | "quarterly" => Ok(Period::Quarterly),
            "y" | "year" | "yearly" => Ok(Period::Yearly),
            _ => Err(format!("Invalid period: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bucket_end() {
        assert_eq!(Period::Daily.bucket_end(date(2024, 2, 10)), date(2024, 2, 10));
        assert_eq!(Period::Monthly.bucket_end(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(Period::Monthly.bucket_end(date(2023, 12, 5)), date(2023, 12, 31));
        assert_eq!(Period::Quarterly.bucket_end(date(2024, 5, 1)), date(2024, 6, 30));
        assert_eq!(Period::Quarterly.bucket_end(date(2024, 11, 1)), date(2024, 12, 31));
        assert_eq!(Period::Yearly.bucket_end(date(2024, 3, 15)), date(2024, 12, 31));
    }

    #[test]
    fn test_period_parse() {
        assert_eq!(Period::from_str("monthly").unwrap(), Period::Monthly);
        assert_eq!(Period::from_str("Q").unwrap(), Period::Quarterly);
        assert_eq!(Period::from_str("y").unwrap(), Period::Yearly);
        assert!(Period::from_str("weekly").is_err());
    }

    #[test]
    fn test_period_display() {
        assert_eq!(Period::Daily.to_string(), "daily");
        assert_eq!(Period::Quarterly.to_string(), "quarterly");
    }
}
