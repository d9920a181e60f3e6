//! Core domain types and logic.

pub mod condition;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod kline;
pub mod results;
pub mod rule_eval;
pub mod strategy;
