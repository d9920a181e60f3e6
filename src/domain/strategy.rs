//! Strategy configuration schema.
//!
//! Field names and enum strings match the original JSON export format so
//! previously exported strategies keep loading. Optional blocks absent
//! from the JSON mean "feature disabled". Options metadata is carried but
//! never consumed by the simulation engine.

use serde::{Deserialize, Serialize};

use crate::domain::condition::{Condition, ConditionGroup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionSide {
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Market,
    Limit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AmountUnit {
    Percent,
    Fixed,
}

/// Unit for stop-loss / take-profit / limit offsets: percent of the
/// reference price, or an absolute price offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceUnit {
    Percent,
    PriceOffset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetType {
    #[default]
    Spot,
    Options,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionContractType {
    Call,
    Put,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionMoneyness {
    Itm,
    Atm,
    Otm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PyramidingStyle {
    CompoundingUp,
    AveragingDown,
    Sideways,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSizing {
    pub amount: f64,
    pub unit: AmountUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimitPrice {
    pub value: f64,
    pub unit: PriceUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSettings {
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<LimitPrice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopLoss {
    pub value: f64,
    pub unit: PriceUnit,
    /// Absent in legacy exports; defaults to a fixed (non-trailing) stop.
    #[serde(default)]
    pub trailing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TakeProfit {
    pub value: f64,
    pub unit: PriceUnit,
}

/// Add-to-position configuration. Carried in the schema; the simulation
/// engine does not currently execute additional entries (see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pyramiding {
    pub max_entries: u32,
    pub strategy: PyramidingStyle,
    pub conditions: Vec<ConditionGroup>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionParams {
    pub contract_type: OptionContractType,
    pub moneyness: OptionMoneyness,
    pub expiration_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub market: String,
    pub timeframe: String,
    #[serde(default)]
    pub data_source: String,
    /// Absent in legacy exports; defaults to SPOT.
    #[serde(default)]
    pub asset_type: AssetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_params: Option<OptionParams>,
    pub side: PositionSide,
    pub position_sizing: PositionSizing,
    pub order_settings: OrderSettings,
    #[serde(default)]
    pub entry_conditions: Vec<ConditionGroup>,
    #[serde(default)]
    pub exit_conditions: Vec<ConditionGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pyramiding: Option<Pyramiding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<StopLoss>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<TakeProfit>,
    /// Legacy flat condition list from old exports. Migrated into a
    /// single entry group by [`Strategy::migrate_legacy`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

impl Strategy {
    /// Upgrade legacy-format fields in place. Applied once at load time;
    /// the engine itself never sees pre-migration strategies.
    ///
    /// A legacy flat condition list becomes one AND-group prepended to
    /// the entry rule set (old exports had no grouping). Missing
    /// `trailing` and `assetType` fields are already covered by serde
    /// defaults.
    pub fn migrate_legacy(&mut self) {
        if let Some(flat) = self.conditions.take() {
            if !flat.is_empty() {
                self.entry_conditions.insert(
                    0,
                    ConditionGroup {
                        id: format!("{}-legacy", self.id),
                        conditions: flat,
                    },
                );
            }
        }
    }
}
