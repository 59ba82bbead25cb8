#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use marketperf::domain::error::MarketPerfError;
use marketperf::domain::price_series::PricePoint;
use marketperf::ports::data_port::MarketDataPort;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
    pub calls: AtomicUsize,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_points(mut self, symbol: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(symbol.to_string(), points);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MarketDataPort for MockDataPort {
    fn fetch_history(&self, symbol: &str) -> Result<Vec<PricePoint>, MarketPerfError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self.errors.get(symbol) {
            return Err(MarketPerfError::Provider {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 2024-03-15 (a Friday), mid-session in New York.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 16, 0, 0).unwrap()
}

pub fn point(date_str: &str, close: f64) -> PricePoint {
    PricePoint::new(
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        close,
    )
}

/// One point per calendar day ending at `end`, rising by `step` each day.
pub fn generate_points(
    end: NaiveDate,
    count: usize,
    start_price: f64,
    step: f64,
) -> Vec<PricePoint> {
    (0..count)
        .map(|i| {
            let back = (count - 1 - i) as u64;
            PricePoint::new(
                end.checked_sub_days(chrono::Days::new(back)).unwrap(),
                start_price + step * i as f64,
            )
        })
        .collect()
}
