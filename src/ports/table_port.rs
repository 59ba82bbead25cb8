//! Performance table export port trait.

use crate::domain::error::MarketPerfError;
use crate::domain::table::PerformanceRow;
use crate::domain::window::Window;
use std::path::Path;

pub trait TableWriter {
    /// Write `rows` to `path`, replacing anything already there.
    fn write_table(
        &self,
        windows: &[Window],
        rows: &[PerformanceRow],
        path: &Path,
    ) -> Result<(), MarketPerfError>;
}
