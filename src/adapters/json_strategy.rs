//! Strategy and result JSON IO.
//!
//! Loading always applies [`Strategy::migrate_legacy`], so the rest of
//! the program only ever sees current-format strategies.

use std::fs;
use std::path::Path;

use crate::domain::error::StratforgeError;
use crate::domain::results::BacktestResult;
use crate::domain::strategy::Strategy;

pub fn load_strategy<P: AsRef<Path>>(path: P) -> Result<Strategy, StratforgeError> {
    let content = fs::read_to_string(path)?;
    let mut strategy: Strategy = serde_json::from_str(&content)?;
    strategy.migrate_legacy();
    Ok(strategy)
}

pub fn save_strategy<P: AsRef<Path>>(path: P, strategy: &Strategy) -> Result<(), StratforgeError> {
    let json = serde_json::to_string_pretty(strategy)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn save_result<P: AsRef<Path>>(path: P, result: &BacktestResult) -> Result<(), StratforgeError> {
    let json = serde_json::to_string_pretty(result)?;
    fs::write(path, json)?;
    Ok(())
}

/// Human-readable warnings about a strategy that parses fine but will
/// behave surprisingly when simulated.
pub fn lint(strategy: &Strategy) -> Vec<String> {
    let mut warnings = Vec::new();
    if strategy.entry_conditions.is_empty() {
        warnings.push("no entry conditions: the simulation will never open a position".into());
    }
    for group in strategy
        .entry_conditions
        .iter()
        .chain(strategy.exit_conditions.iter())
    {
        if group.conditions.is_empty() {
            warnings.push(format!("condition group '{}' is empty and never fires", group.id));
        }
    }
    if strategy.exit_conditions.is_empty()
        && strategy.stop_loss.is_none()
        && strategy.take_profit.is_none()
    {
        warnings.push("no exit conditions, stop-loss, or take-profit: positions never close".into());
    }
    if let Some(sl) = &strategy.stop_loss {
        if sl.value <= 0.0 {
            warnings.push(format!("stop-loss value {} is not positive", sl.value));
        }
    }
    if let Some(tp) = &strategy.take_profit {
        if tp.value <= 0.0 {
            warnings.push(format!("take-profit value {} is not positive", tp.value));
        }
    }
    if strategy.position_sizing.amount <= 0.0 || strategy.position_sizing.amount > 100.0 {
        warnings.push(format!(
            "position sizing amount {} is outside (0, 100]",
            strategy.position_sizing.amount
        ));
    }
    if strategy.pyramiding.is_some() {
        warnings.push("pyramiding is configured but not executed by the simulator".into());
    }
    warnings
}
