//! CSV file history adapter.
//!
//! Offline stand-in for the network provider: one `date,open,high,low,close,volume`
//! file per symbol under a base directory. Only `date` and `close` are read.

use crate::domain::error::MarketPerfError;
use crate::domain::price_series::PricePoint;
use crate::ports::data_port::MarketDataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvHistoryAdapter {
    base_path: PathBuf,
}

impl CsvHistoryAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// `^GSPC` is stored as `_GSPC.csv`, `GC=F` as `GC_F.csv`.
    pub fn file_stem(symbol: &str) -> String {
        symbol
            .chars()
            .map(|c| match c {
                '^' | '=' | '/' | '\\' | ':' => '_',
                other => other,
            })
            .collect()
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", Self::file_stem(symbol)))
    }
}

fn column(headers: &csv::StringRecord, name: &str, symbol: &str) -> Result<usize, MarketPerfError> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| MarketPerfError::Provider {
            symbol: symbol.to_string(),
            reason: format!("missing {name} column"),
        })
}

impl MarketDataPort for CsvHistoryAdapter {
    fn fetch_history(&self, symbol: &str) -> Result<Vec<PricePoint>, MarketPerfError> {
        let path = self.csv_path(symbol);
        if !path.exists() {
            return Err(MarketPerfError::NoData {
                symbol: symbol.to_string(),
            });
        }
        let content = fs::read_to_string(&path).map_err(|e| MarketPerfError::Provider {
            symbol: symbol.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers()?.clone();
        let date_col = column(&headers, "date", symbol)?;
        let close_col = column(&headers, "close", symbol)?;

        let mut points = Vec::new();
        for result in rdr.records() {
            let record = result?;

            let date_str = record.get(date_col).unwrap_or_default().trim();
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                MarketPerfError::Provider {
                    symbol: symbol.to_string(),
                    reason: format!("invalid date '{}': {}", date_str, e),
                }
            })?;

            // Blank closes mark non-trading rows; skip them like the HTTP adapter skips nulls.
            let close_str = record.get(close_col).unwrap_or_default().trim();
            if close_str.is_empty() {
                continue;
            }
            let close: f64 = close_str.parse().map_err(|e| MarketPerfError::Provider {
                symbol: symbol.to_string(),
                reason: format!("invalid close value '{}': {}", close_str, e),
            })?;

            points.push(PricePoint::new(date, close));
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_data() -> TempDir {
        let dir = TempDir::new().unwrap();

        fs::write(
            dir.path().join("_GSPC.csv"),
            "date,open,high,low,close,volume\n\
             2024-01-02,4745.2,4754.3,4722.7,4742.83,3743050000\n\
             2024-01-03,4725.1,4729.3,4699.7,4704.81,3950760000\n\
             2024-01-04,4697.4,4726.8,4687.5,,0\n",
        )
        .unwrap();
        fs::write(dir.path().join("GC_F.csv"), "date,close\n2024-01-02,2073.4\n").unwrap();
        fs::write(dir.path().join("BAD.csv"), "date,close\n02/01/2024,1.0\n").unwrap();
        fs::write(dir.path().join("NOCLOSE.csv"), "date,open\n2024-01-02,1.0\n").unwrap();

        dir
    }

    #[test]
    fn file_stem_replaces_reserved_characters() {
        assert_eq!(CsvHistoryAdapter::file_stem("^GSPC"), "_GSPC");
        assert_eq!(CsvHistoryAdapter::file_stem("GC=F"), "GC_F");
        assert_eq!(CsvHistoryAdapter::file_stem("BTC-USD"), "BTC-USD");
    }

    #[test]
    fn fetch_history_reads_close_and_skips_blank() {
        let dir = setup_test_data();
        let adapter = CsvHistoryAdapter::new(dir.path().to_path_buf());

        let points = adapter.fetch_history("^GSPC").unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(points[0].close, 4742.83);
        assert_eq!(points[1].close, 4704.81);
    }

    #[test]
    fn fetch_history_accepts_minimal_columns() {
        let dir = setup_test_data();
        let adapter = CsvHistoryAdapter::new(dir.path().to_path_buf());
        let points = adapter.fetch_history("GC=F").unwrap();
        let jan_2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(points, vec![PricePoint::new(jan_2, 2073.4)]);
    }

    #[test]
    fn missing_file_is_no_data() {
        let dir = setup_test_data();
        let adapter = CsvHistoryAdapter::new(dir.path().to_path_buf());
        assert!(matches!(
            adapter.fetch_history("ETH-USD"),
            Err(MarketPerfError::NoData { .. })
        ));
    }

    #[test]
    fn bad_date_is_provider_error() {
        let dir = setup_test_data();
        let adapter = CsvHistoryAdapter::new(dir.path().to_path_buf());
        assert!(matches!(
            adapter.fetch_history("BAD"),
            Err(MarketPerfError::Provider { .. })
        ));
    }

    #[test]
    fn missing_close_column_is_provider_error() {
        let dir = setup_test_data();
        let adapter = CsvHistoryAdapter::new(dir.path().to_path_buf());
        let err = adapter.fetch_history("NOCLOSE").unwrap_err();
        assert!(err.to_string().contains("missing close column"));
    }
}
