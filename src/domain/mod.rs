//! Core domain types and logic.

pub mod error;
pub mod instrument;
pub mod performance;
pub mod price_series;
pub mod run_config;
pub mod table;
pub mod window;
