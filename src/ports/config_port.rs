//! Configuration access port.

use crate::domain::error::StratforgeError;

/// Read-only access to runtime settings. Missing keys fall back to the
/// caller's default; a key that is present but malformed is an error
/// rather than a silent fallback.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> Result<i64, StratforgeError>;
    fn get_float(&self, section: &str, key: &str, default: f64) -> Result<f64, StratforgeError>;
}
