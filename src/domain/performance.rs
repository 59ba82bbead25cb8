//! Trailing performance over lookback windows.
//!
//! Nothing in here returns an error. A failed fetch or an unresolvable
//! window degrades to `None` and the reason travels back as a diagnostic.

use crate::domain::instrument::Instrument;
use crate::domain::price_series::PriceSeries;
use crate::domain::window::{Lookback, Window};
use crate::ports::data_port::MarketDataPort;
use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct WindowResult {
    pub label: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub current_price: Option<f64>,
    pub end_date: Option<NaiveDate>,
    pub performance: Vec<WindowResult>,
    pub diagnostic: Option<String>,
}

impl Score {
    /// Every field absent, one `None` per window.
    pub fn absent(windows: &[Window], diagnostic: Option<String>) -> Self {
        Self {
            current_price: None,
            end_date: None,
            performance: windows
                .iter()
                .map(|w| WindowResult {
                    label: w.label.clone(),
                    value: None,
                })
                .collect(),
            diagnostic,
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.performance
            .iter()
            .find(|r| r.label == label)
            .and_then(|r| r.value)
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.performance.iter().map(|r| r.value).collect()
    }
}

/// Point change for yields, percent change otherwise.
///
/// Percent change needs a strictly positive reference.
pub fn change(current: f64, reference: f64, is_yield: bool) -> Option<f64> {
    let value = if is_yield {
        current - reference
    } else if reference > 0.0 {
        100.0 * (current - reference) / reference
    } else {
        return None;
    };
    value.is_finite().then_some(value)
}

pub fn reference_price(
    series: &PriceSeries,
    lookback: Lookback,
    now: DateTime<Utc>,
) -> Option<f64> {
    let point = match lookback {
        Lookback::PreviousObservation => series.previous()?,
        Lookback::CalendarDays(n) => {
            let target = now.date_naive().checked_sub_days(Days::new(u64::from(n)))?;
            series.first_on_or_after(target)?
        }
    };
    Some(point.close).filter(|c| c.is_finite())
}

/// Score an already-fetched series.
pub fn score_series(
    series: &PriceSeries,
    instrument: &Instrument,
    windows: &[Window],
    now: DateTime<Utc>,
) -> Score {
    let Some(latest) = series.latest() else {
        return Score::absent(windows, Some(format!("no data for {}", instrument.symbol)));
    };

    let current_price = Some(latest.close).filter(|c| c.is_finite());
    let is_yield = instrument.is_yield();

    let performance = windows
        .iter()
        .map(|w| {
            let value = current_price.and_then(|current| {
                let reference = reference_price(series, w.lookback, now)?;
                change(current, reference, is_yield)
            });
            if value.is_none() {
                debug!(symbol = instrument.symbol, window = %w.label, "window unresolved");
            }
            WindowResult {
                label: w.label.clone(),
                value,
            }
        })
        .collect();

    Score {
        current_price,
        end_date: Some(latest.date),
        performance,
        diagnostic: None,
    }
}

/// Fetch the full history for `instrument` and score it.
pub fn fetch_and_score(
    provider: &dyn MarketDataPort,
    instrument: &Instrument,
    windows: &[Window],
    now: DateTime<Utc>,
) -> Score {
    let points = match provider.fetch_history(instrument.symbol) {
        Ok(points) => points,
        Err(e) => {
            warn!(symbol = instrument.symbol, error = %e, "fetch failed");
            return Score::absent(windows, Some(e.to_string()));
        }
    };

    let series = PriceSeries::from_points(points);
    if series.is_empty() {
        warn!(symbol = instrument.symbol, "provider returned no data");
    } else {
        info!(
            symbol = instrument.symbol,
            observations = series.len(),
            "fetched history"
        );
    }
    score_series(&series, instrument, windows, now)
}
