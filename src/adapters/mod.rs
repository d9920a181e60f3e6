//! Concrete adapter implementations for ports.

pub mod csv_data;
pub mod file_config_adapter;
pub mod json_strategy;
pub mod synthetic_data;
