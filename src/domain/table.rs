//! One performance row per catalog instrument.

use crate::domain::instrument::Instrument;
use crate::domain::performance::{fetch_and_score, Score};
use crate::domain::window::Window;
use crate::ports::data_port::MarketDataPort;
use chrono::{DateTime, NaiveDate, Utc};
use rayon::prelude::*;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRow {
    pub symbol: String,
    pub name: String,
    pub region: String,
    pub asset_class: String,
    pub end_date: Option<NaiveDate>,
    pub current_price: Option<f64>,
    /// One entry per window, in window order.
    pub perf: Vec<Option<f64>>,
}

impl PerformanceRow {
    pub fn from_score(instrument: &Instrument, score: &Score) -> Self {
        Self {
            symbol: instrument.symbol.to_string(),
            name: instrument.name.to_string(),
            region: instrument.region.to_string(),
            asset_class: instrument.asset_class.to_string(),
            end_date: score.end_date,
            current_price: score.current_price,
            perf: score.values(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current_price.is_none()
            && self.end_date.is_none()
            && self.perf.iter().all(Option::is_none)
    }
}

/// Score every instrument in `catalog`, keeping catalog order.
///
/// With `parallel` the fetches run on the rayon pool; the collected order is
/// still the catalog order.
pub fn build_table(
    provider: &dyn MarketDataPort,
    catalog: &[Instrument],
    windows: &[Window],
    now: DateTime<Utc>,
    parallel: bool,
) -> Vec<PerformanceRow> {
    let score_one = |instrument: &Instrument| {
        let score = fetch_and_score(provider, instrument, windows, now);
        PerformanceRow::from_score(instrument, &score)
    };

    let rows: Vec<PerformanceRow> = if parallel {
        catalog.par_iter().map(score_one).collect()
    } else {
        catalog.iter().map(score_one).collect()
    };

    let missing = rows.iter().filter(|r| r.is_empty()).count();
    info!(
        instruments = rows.len(),
        missing,
        "performance table assembled"
    );
    rows
}
