//! CSV export of the performance table.
//!
//! Absent values are written as empty fields. Numbers use the shortest
//! representation that parses back to the same `f64`, so [`read_table`]
//! reproduces exactly what was written.

use crate::domain::error::MarketPerfError;
use crate::domain::table::PerformanceRow;
use crate::domain::window::Window;
use crate::ports::table_port::TableWriter;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

const FIXED_COLUMNS: [&str; 6] = [
    "Symbol",
    "Name",
    "Region",
    "Asset Class",
    "End Date",
    "Current Price",
];
const PERF_PREFIX: &str = "Perf ";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Default)]
pub struct CsvTableAdapter;

fn format_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn table_error(reason: impl Into<String>) -> MarketPerfError {
    MarketPerfError::Table {
        reason: reason.into(),
    }
}

impl TableWriter for CsvTableAdapter {
    fn write_table(
        &self,
        windows: &[Window],
        rows: &[PerformanceRow],
        path: &Path,
    ) -> Result<(), MarketPerfError> {
        if let Some(row) = rows.iter().find(|r| r.perf.len() != windows.len()) {
            return Err(table_error(format!(
                "{} has {} performance values for {} windows",
                row.symbol,
                row.perf.len(),
                windows.len()
            )));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut wtr = csv::Writer::from_path(path)?;

        let header: Vec<String> = FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(windows.iter().map(Window::column))
            .collect();
        wtr.write_record(&header)?;

        for row in rows {
            let mut record = vec![
                row.symbol.clone(),
                row.name.clone(),
                row.region.clone(),
                row.asset_class.clone(),
                row.end_date
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_default(),
                format_value(row.current_price),
            ];
            record.extend(row.perf.iter().copied().map(format_value));
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

/// Contents of an exported table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableContents {
    /// Window labels, taken from the `Perf <label>` headers.
    pub labels: Vec<String>,
    pub rows: Vec<PerformanceRow>,
}

fn parse_value(field: &str, column: &str) -> Result<Option<f64>, MarketPerfError> {
    let field = field.trim();
    if field.is_empty() || field.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    field
        .parse()
        .map(Some)
        .map_err(|_| table_error(format!("invalid number '{field}' in {column}")))
}

pub fn read_table(path: &Path) -> Result<TableContents, MarketPerfError> {
    let mut rdr = csv::Reader::from_path(path)?;
    let headers = rdr.headers()?.clone();

    if headers.len() < FIXED_COLUMNS.len()
        || headers.iter().zip(FIXED_COLUMNS).any(|(h, want)| h != want)
    {
        return Err(table_error("unexpected header"));
    }

    let labels = headers
        .iter()
        .skip(FIXED_COLUMNS.len())
        .map(|h| {
            h.strip_prefix(PERF_PREFIX)
                .map(str::to_string)
                .ok_or_else(|| table_error(format!("unexpected column '{h}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let field = |i: usize| record.get(i).unwrap_or_default();

        let end_date = match field(4).trim() {
            "" => None,
            s => Some(
                NaiveDate::parse_from_str(s, DATE_FORMAT)
                    .map_err(|_| table_error(format!("invalid end date '{s}'")))?,
            ),
        };

        let perf = labels
            .iter()
            .enumerate()
            .map(|(i, label)| parse_value(field(FIXED_COLUMNS.len() + i), label))
            .collect::<Result<Vec<_>, _>>()?;

        rows.push(PerformanceRow {
            symbol: field(0).to_string(),
            name: field(1).to_string(),
            region: field(2).to_string(),
            asset_class: field(3).to_string(),
            end_date,
            current_price: parse_value(field(5), "Current Price")?,
            perf,
        });
    }

    Ok(TableContents { labels, rows })
}
