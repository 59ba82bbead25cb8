//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod csv_table_adapter;
pub mod file_config_adapter;
pub mod yahoo_adapter;
