//! Condition and condition-group data structures.
//!
//! A condition compares an indicator against either a second indicator or
//! a numeric constant. Groups AND their conditions together; a rule set
//! is an OR over groups (see [`crate::domain::rule_eval`]).

use serde::{Deserialize, Serialize};

use crate::domain::indicator::{IndicatorName, IndicatorParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    GreaterThan,
    LessThan,
    CrossesAbove,
    CrossesBelow,
}

/// Right-hand side of a comparison: either a second indicator (its params
/// live in `indicator2Params`) or a fixed numeric constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Indicator(IndicatorName),
    Literal(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub id: String,
    pub indicator1: IndicatorName,
    #[serde(default)]
    pub indicator1_params: IndicatorParams,
    pub operator: Operator,
    pub indicator2: Operand,
    #[serde(default)]
    pub indicator2_params: IndicatorParams,
}

/// Conditions combined with AND: all must hold at a bar index for the
/// group to fire. An empty group never fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub id: String,
    pub conditions: Vec<Condition>,
}
