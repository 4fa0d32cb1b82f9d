//! Daily OHLC price types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One trading day of a price series. The date is the series key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Trading date (exchange-local)
    pub date: NaiveDate,
    /// Opening price
    pub open: Decimal,
    /// Highest price
    pub high: Decimal,
    /// Lowest price
    pub low: Decimal,
    /// Closing price
    pub close: Decimal,
}

impl PriceRecord {
    /// Create a new record.
    pub fn new(date: NaiveDate, open: Decimal, high: Decimal, low: Decimal, close: Decimal) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
        }
    }

    /// Value of a single price column.
    #[inline]
    pub fn field(&self, field: PriceField) -> Decimal {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
        }
    }

    /// The same prices under a different date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }
}

/// The price columns of a record, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
}

impl PriceField {
    /// All price columns in storage order.
    pub const ALL: [PriceField; 4] = [
        PriceField::Open,
        PriceField::High,
        PriceField::Low,
        PriceField::Close,
    ];

    /// Column header as written to the store.
    pub fn header(&self) -> &'static str {
        match self {
            PriceField::Open => "Open",
            PriceField::High => "High",
            PriceField::Low => "Low",
            PriceField::Close => "Close",
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Counts produced by [`PriceSeries::merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Dates that were not present before
    pub added: usize,
    /// Existing dates whose prices were overwritten with different values
    pub replaced: usize,
    /// Incoming records identical to what was already stored
    pub unchanged: usize,
}

impl MergeStats {
    /// Whether the merge changed the series at all.
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.replaced == 0
    }
}

/// Daily price series, strictly ascending by date with no duplicate dates.
///
/// Every constructor normalizes its input, so the ordering invariant holds for
/// any value of this type. When the input repeats a date, the record that
/// comes later wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    records: Vec<PriceRecord>,
}

impl PriceSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from records in any order.
    pub fn from_records(records: impl IntoIterator<Item = PriceRecord>) -> Self {
        let by_date: BTreeMap<NaiveDate, PriceRecord> =
            records.into_iter().map(|r| (r.date, r)).collect();
        Self {
            records: by_date.into_values().collect(),
        }
    }

    /// Get the number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    /// Consume the series and return its records.
    pub fn into_records(self) -> Vec<PriceRecord> {
        self.records
    }

    /// Get an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, PriceRecord> {
        self.records.iter()
    }

    /// Oldest record.
    pub fn first(&self) -> Option<&PriceRecord> {
        self.records.first()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&PriceRecord> {
        self.records.last()
    }

    /// Earliest date in the series.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.first().map(|r| r.date)
    }

    /// Latest date in the series (the cache's known maximum date).
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.last().map(|r| r.date)
    }

    /// Look up the record for a date.
    pub fn get(&self, date: NaiveDate) -> Option<&PriceRecord> {
        self.records
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|i| &self.records[i])
    }

    /// The last `n` records, oldest first.
    pub fn last_n(&self, n: usize) -> &[PriceRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Records with `start <= date <= end`.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> PriceSeries {
        if start > end {
            return PriceSeries::new();
        }
        let lo = self.records.partition_point(|r| r.date < start);
        let hi = self.records.partition_point(|r| r.date <= end);
        Self {
            records: self.records[lo..hi].to_vec(),
        }
    }

    /// Extract one price column.
    pub fn column(&self, field: PriceField) -> Vec<Decimal> {
        self.records.iter().map(|r| r.field(field)).collect()
    }

    /// Extract close prices.
    pub fn closes(&self) -> Vec<Decimal> {
        self.column(PriceField::Close)
    }

    /// Merge `incoming` into this series keyed by date. Incoming records
    /// overwrite existing ones with the same date.
    pub fn merge(&mut self, incoming: PriceSeries) -> MergeStats {
        let mut stats = MergeStats::default();
        if incoming.is_empty() {
            return stats;
        }

        let mut by_date: BTreeMap<NaiveDate, PriceRecord> =
            self.records.drain(..).map(|r| (r.date, r)).collect();

        for record in incoming.records {
            match by_date.insert(record.date, record) {
                None => stats.added += 1,
                Some(previous) if previous != record => stats.replaced += 1,
                Some(_) => stats.unchanged += 1,
            }
        }

        self.records = by_date.into_values().collect();
        stats
    }
}

impl FromIterator<PriceRecord> for PriceSeries {
    fn from_iter<T: IntoIterator<Item = PriceRecord>>(iter: T) -> Self {
        Self::from_records(iter)
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PriceRecord;
    type IntoIter = std::slice::Iter<'a, PriceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn record(d: u32, close: Decimal) -> PriceRecord {
        PriceRecord::new(day(d), close, close + dec!(5), close - dec!(5), close)
    }

    fn is_strictly_ascending(series: &PriceSeries) -> bool {
        series.records().windows(2).all(|w| w[0].date < w[1].date)
    }

    #[test]
    fn test_from_records_sorts_and_dedups_last_wins() {
        let series = PriceSeries::from_records(vec![
            record(5, dec!(2300)),
            record(3, dec!(2290)),
            record(5, dec!(2310)),
            record(4, dec!(2295)),
        ]);

        assert_eq!(series.len(), 3);
        assert!(is_strictly_ascending(&series));
        assert_eq!(series.get(day(5)).unwrap().close, dec!(2310));
        assert_eq!(series.first_date(), Some(day(3)));
        assert_eq!(series.last_date(), Some(day(5)));
    }

    #[test]
    fn test_merge_counts_added_replaced_unchanged() {
        let mut series =
            PriceSeries::from_records(vec![record(3, dec!(2290)), record(4, dec!(2295))]);

        let stats = series.merge(PriceSeries::from_records(vec![
            record(4, dec!(2296)),
            record(3, dec!(2290)),
            record(6, dec!(2320)),
        ]));

        assert_eq!(
            stats,
            MergeStats {
                added: 1,
                replaced: 1,
                unchanged: 1
            }
        );
        assert!(!stats.is_noop());
        assert_eq!(series.len(), 3);
        assert_eq!(series.get(day(4)).unwrap().close, dec!(2296));
        assert!(is_strictly_ascending(&series));
    }

    #[test]
    fn test_merge_empty_is_noop() {
        let mut series = PriceSeries::from_records(vec![record(3, dec!(2290))]);
        let before = series.clone();

        let stats = series.merge(PriceSeries::new());

        assert!(stats.is_noop());
        assert_eq!(series, before);
    }

    #[test]
    fn test_between_is_inclusive() {
        let series: PriceSeries = (3..=9).map(|d| record(d, dec!(2300))).collect();

        let slice = series.between(day(4), day(6));
        assert_eq!(slice.len(), 3);
        assert_eq!(slice.first_date(), Some(day(4)));
        assert_eq!(slice.last_date(), Some(day(6)));

        assert!(series.between(day(6), day(4)).is_empty());
        assert!(series.between(day(20), day(25)).is_empty());
    }

    #[test]
    fn test_last_n() {
        let series: PriceSeries = (1..=10).map(|d| record(d, dec!(2300))).collect();

        assert_eq!(series.last_n(3).len(), 3);
        assert_eq!(series.last_n(3)[0].date, day(8));
        assert_eq!(series.last_n(50).len(), 10);
    }

    #[test]
    fn test_column_extraction() {
        let series = PriceSeries::from_records(vec![record(3, dec!(10)), record(4, dec!(20))]);

        assert_eq!(series.closes(), vec![dec!(10), dec!(20)]);
        assert_eq!(series.column(PriceField::High), vec![dec!(15), dec!(25)]);
    }
}
