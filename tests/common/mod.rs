#![allow(dead_code)]

use stratforge::domain::condition::{Condition, ConditionGroup, Operand, Operator};
use stratforge::domain::error::StratforgeError;
use stratforge::domain::indicator::{IndicatorName, IndicatorParams};
use stratforge::domain::kline::Kline;
use stratforge::domain::strategy::{
    AmountUnit, OrderSettings, OrderType, PositionSide, PositionSizing, Strategy,
};
use stratforge::ports::generator_port::StrategyGenerator;

pub fn kline(i: i64, open: f64, high: f64, low: f64, close: f64) -> Kline {
    Kline {
        timestamp: 1_700_000_000_000 + i * 3_600_000,
        open,
        high,
        low,
        close,
        volume: 1000.0,
    }
}

pub fn flat_klines(closes: &[f64]) -> Vec<Kline> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| kline(i as i64, c, c + 1.0, c - 1.0, c))
        .collect()
}

pub fn condition(
    id: &str,
    indicator1: IndicatorName,
    params1: IndicatorParams,
    operator: Operator,
    indicator2: Operand,
    params2: IndicatorParams,
) -> Condition {
    Condition {
        id: id.into(),
        indicator1,
        indicator1_params: params1,
        operator,
        indicator2,
        indicator2_params: params2,
    }
}

pub fn group(id: &str, conditions: Vec<Condition>) -> ConditionGroup {
    ConditionGroup {
        id: id.into(),
        conditions,
    }
}

pub fn period(p: u32) -> IndicatorParams {
    IndicatorParams {
        period: Some(p),
        ..Default::default()
    }
}

/// Long strategy with all-in sizing and no risk targets; conditions are
/// filled in by each test.
pub fn base_strategy() -> Strategy {
    Strategy {
        id: "it".into(),
        name: "integration".into(),
        description: String::new(),
        market: "BTC/USDT".into(),
        timeframe: "1h".into(),
        data_source: String::new(),
        asset_type: Default::default(),
        option_params: None,
        side: PositionSide::Long,
        position_sizing: PositionSizing {
            amount: 100.0,
            unit: AmountUnit::Percent,
        },
        order_settings: OrderSettings {
            order_type: OrderType::Market,
            limit_price: None,
        },
        entry_conditions: vec![],
        exit_conditions: vec![],
        pyramiding: None,
        stop_loss: None,
        take_profit: None,
        conditions: None,
    }
}

/// Canned generator for exercising the generation boundary offline.
pub struct MockGenerator {
    pub response: Result<Strategy, String>,
}

impl StrategyGenerator for MockGenerator {
    fn generate_strategy(&self, _prompt: &str) -> Result<Strategy, StratforgeError> {
        match &self.response {
            Ok(strategy) => Ok(strategy.clone()),
            Err(reason) => Err(StratforgeError::Generation {
                reason: reason.clone(),
            }),
        }
    }
}
