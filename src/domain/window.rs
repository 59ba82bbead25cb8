//! Lookback windows.

use std::fmt;

/// How a window locates its reference price.
///
/// `PreviousObservation` counts observations, `CalendarDays` counts days back
/// from the wall clock. A one-day calendar offset over a weekend resolves to a
/// different bar than the prior trading session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    PreviousObservation,
    CalendarDays(u32),
}

impl Lookback {
    /// `0` means the previous observation; anything else is a calendar offset.
    pub fn from_days(days: u32) -> Self {
        if days == 0 {
            Lookback::PreviousObservation
        } else {
            Lookback::CalendarDays(days)
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            Lookback::PreviousObservation => 0,
            Lookback::CalendarDays(n) => *n,
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookback::PreviousObservation => write!(f, "previous observation"),
            Lookback::CalendarDays(n) => write!(f, "{n} calendar days"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub label: String,
    pub lookback: Lookback,
}

impl Window {
    pub fn new(label: impl Into<String>, lookback: Lookback) -> Self {
        Self {
            label: label.into(),
            lookback,
        }
    }

    /// CSV column header for this window.
    pub fn column(&self) -> String {
        format!("Perf {}", self.label)
    }
}

pub fn standard_windows() -> Vec<Window> {
    vec![
        Window::new("1D", Lookback::PreviousObservation),
        Window::new("1W", Lookback::CalendarDays(7)),
        Window::new("1M", Lookback::CalendarDays(30)),
        Window::new("3M", Lookback::CalendarDays(90)),
        Window::new("6M", Lookback::CalendarDays(182)),
        Window::new("1Y", Lookback::CalendarDays(365)),
        Window::new("2Y", Lookback::CalendarDays(365 * 2)),
        Window::new("3Y", Lookback::CalendarDays(365 * 3)),
    ]
}
