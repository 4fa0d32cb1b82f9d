//! Delimited-file store for a single price series.

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use gold_core::error::DataError;
use gold_core::types::{PriceField, PriceRecord, PriceSeries};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Header of the date column as written to the store.
const DATE_HEADER: &str = "Date";

/// Row format on read, keyed by lowercased header. Extra columns (Volume,
/// Adj Close, ...) are ignored.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    date: String,
    #[serde(deserialize_with = "decimal_field")]
    open: Decimal,
    #[serde(deserialize_with = "decimal_field")]
    high: Decimal,
    #[serde(deserialize_with = "decimal_field")]
    low: Decimal,
    #[serde(deserialize_with = "decimal_field")]
    close: Decimal,
}

/// Row format on write.
#[derive(Debug, Serialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Open")]
    open: String,
    #[serde(rename = "High")]
    high: String,
    #[serde(rename = "Low")]
    low: String,
    #[serde(rename = "Close")]
    close: String,
}

impl From<&PriceRecord> for CsvRow {
    fn from(r: &PriceRecord) -> Self {
        Self {
            date: r.date.format("%Y-%m-%d").to_string(),
            open: r.open.to_string(),
            high: r.high.to_string(),
            low: r.low.to_string(),
            close: r.close.to_string(),
        }
    }
}

fn decimal_field<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_decimal(&raw).map_err(serde::de::Error::custom)
}

fn parse_decimal(raw: &str) -> Result<Decimal, String> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| format!("invalid price: {:?}", raw))
}

/// A delimited text file holding one daily price series.
///
/// The file is read and rewritten wholesale; there is no append path.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
    delimiter: u8,
}

impl CsvStore {
    /// Create a comma-delimited store at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    /// Use a different field delimiter (the legacy export uses `;`).
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read and normalize the stored series.
    ///
    /// A missing file is `DataError::Io` with `NotFound`; a file with a missing
    /// required column or any unparsable row is `DataError::StoreUnreadable`.
    pub fn read(&self) -> Result<PriceSeries, DataError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_path(&self.path)
            .map_err(|e| match e.into_kind() {
                csv::ErrorKind::Io(io) => DataError::Io(io),
                other => DataError::StoreUnreadable(format!("{:?}", other)),
            })?;

        let headers: csv::StringRecord = reader
            .headers()
            .map_err(|e| DataError::StoreUnreadable(e.to_string()))?
            .iter()
            .map(|h| h.to_ascii_lowercase())
            .collect();
        if let Some(missing) = missing_column(&headers) {
            return Err(DataError::StoreUnreadable(format!(
                "missing required column {}",
                missing
            )));
        }
        reader.set_headers(headers);

        let mut records = Vec::new();
        for (line, result) in reader.deserialize::<CsvRecord>().enumerate() {
            let row = result.map_err(|e| {
                DataError::StoreUnreadable(format!("row {}: {}", line + 1, e))
            })?;
            let date = parse_date(&row.date)?;
            records.push(PriceRecord::new(date, row.open, row.high, row.low, row.close));
        }

        let raw_len = records.len();
        let series = PriceSeries::from_records(records);
        if series.len() != raw_len {
            debug!(
                path = %self.path.display(),
                dropped = raw_len - series.len(),
                "Collapsed duplicate dates in store"
            );
        }

        Ok(series)
    }

    /// Replace the stored series.
    ///
    /// Writes to a sibling temporary file and renames it over the target, so a
    /// failed write leaves the previous file intact.
    pub fn write(&self, series: &PriceSeries) -> Result<(), DataError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.tmp_path();
        let result = self.write_to(&tmp_path, series);
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        debug!(path = %self.path.display(), rows = series.len(), "Wrote price store");
        Ok(())
    }

    fn write_to(&self, path: &Path, series: &PriceSeries) -> Result<(), DataError> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_path(path)
            .map_err(|e| DataError::Internal(e.to_string()))?;

        if series.is_empty() {
            // serialize() only emits headers with the first row
            let mut header = vec![DATE_HEADER];
            header.extend(PriceField::ALL.iter().map(|f| f.header()));
            writer
                .write_record(&header)
                .map_err(|e| DataError::Internal(e.to_string()))?;
        }

        for record in series {
            writer
                .serialize(CsvRow::from(record))
                .map_err(|e| DataError::Internal(e.to_string()))?;
        }

        writer.flush()?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// First required column absent from the lowercased `headers`.
fn missing_column(headers: &csv::StringRecord) -> Option<&'static str> {
    let has = |name: &str| headers.iter().any(|h| h.eq_ignore_ascii_case(name));

    std::iter::once(DATE_HEADER)
        .chain(PriceField::ALL.iter().map(|f| f.header()))
        .find(|name| !has(name))
}

/// Parse the date formats seen in exported price files.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, DataError> {
    let formats = [
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y.%m.%d %H:%M",
        "%Y.%m.%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
    ];

    let raw = raw.trim();
    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt.date());
        }
        if let Ok(d) = NaiveDate::parse_from_str(raw, format) {
            return Ok(d);
        }
    }

    Err(DataError::StoreUnreadable(format!(
        "could not parse date: {}",
        raw
    )))
}
