//! Market-data access port trait.

use crate::domain::error::MarketPerfError;
use crate::domain::price_series::PricePoint;

/// Source of daily close history, keyed by symbol.
///
/// Implementations return the maximum history available. Ordering and
/// duplicate dates are tolerated; the domain normalises both.
pub trait MarketDataPort: Sync {
    fn fetch_history(&self, symbol: &str) -> Result<Vec<PricePoint>, MarketPerfError>;
}
