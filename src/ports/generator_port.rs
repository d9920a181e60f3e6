//! Strategy generation port.

use crate::domain::error::StratforgeError;
use crate::domain::strategy::Strategy;

/// External service that drafts a strategy from a natural-language
/// prompt. Runs before any engine exists, so a failure leaves no state
/// behind and the call can simply be retried.
pub trait StrategyGenerator {
    fn generate_strategy(&self, prompt: &str) -> Result<Strategy, StratforgeError>;
}
