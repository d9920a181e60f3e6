//! Bar-by-bar strategy simulation.
//!
//! The engine owns the kline history, the indicator cache, and all
//! position state. Batch replay ([`StrategyEngine::run`]) and streaming
//! ingestion ([`StrategyEngine::process_kline`]) funnel through the same
//! per-bar transition, so feeding the same bars through either path
//! produces identical trades, markers, and equity samples.
//!
//! One position at a time, always on the strategy's configured side.
//! Fills are idealized: entries and rule exits at the bar open, stop and
//! take-profit exits exactly at their trigger price, no fees or slippage.

use crate::domain::condition::Operand;
use crate::domain::indicator::{self, CacheKey, IndicatorCache, IndicatorName};
use crate::domain::kline::Kline;
use crate::domain::results::{
    profit_loss_pct, round2, win_rate_pct, BacktestResult, EquityPoint, MarkerKind, Trade,
    TradeMarker,
};
use crate::domain::rule_eval::evaluate_groups;
use crate::domain::strategy::{PositionSide, PriceUnit, Strategy};

/// Starting account value for every simulation.
pub const INITIAL_EQUITY: f64 = 10_000.0;

pub struct StrategyEngine {
    strategy: Strategy,
    klines: Vec<Kline>,
    cache: IndicatorCache,
    equity: f64,
    in_position: bool,
    entry_price: f64,
    position_size: f64,
    stop_loss_price: Option<f64>,
    take_profit_price: Option<f64>,
    trades: Vec<Trade>,
    markers: Vec<TradeMarker>,
    performance: Vec<EquityPoint>,
}

/// Offset from a reference price: percent of the price, or absolute.
fn risk_amount(price: f64, value: f64, unit: PriceUnit) -> f64 {
    match unit {
        PriceUnit::Percent => price * value / 100.0,
        PriceUnit::PriceOffset => value,
    }
}

impl StrategyEngine {
    pub fn new(strategy: Strategy, initial_klines: Vec<Kline>) -> Self {
        let mut engine = StrategyEngine {
            strategy,
            klines: initial_klines,
            cache: IndicatorCache::new(),
            equity: INITIAL_EQUITY,
            in_position: false,
            entry_price: 0.0,
            position_size: 0.0,
            stop_loss_price: None,
            take_profit_price: None,
            trades: Vec::new(),
            markers: Vec::new(),
            performance: Vec::new(),
        };
        engine.seed_performance();
        engine
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn klines(&self) -> &[Kline] {
        &self.klines
    }

    pub fn in_position(&self) -> bool {
        self.in_position
    }

    /// Clear all simulation state, keeping the strategy and kline history.
    pub fn reset(&mut self) {
        self.cache.clear();
        self.equity = INITIAL_EQUITY;
        self.in_position = false;
        self.entry_price = 0.0;
        self.position_size = 0.0;
        self.stop_loss_price = None;
        self.take_profit_price = None;
        self.trades.clear();
        self.markers.clear();
        self.performance.clear();
        self.seed_performance();
    }

    /// Replay the entire kline history from scratch. Always resets first,
    /// so calling it twice yields the same result.
    pub fn run(&mut self) {
        self.reset();
        if self.klines.len() < 2 {
            return;
        }
        self.recompute_indicators();
        for i in 1..self.klines.len() {
            self.step(i);
        }
    }

    /// Ingest one bar in streaming mode. The first bar only seeds the
    /// equity series; no rule can fire without a previous bar.
    pub fn process_kline(&mut self, kline: Kline) {
        self.klines.push(kline);
        let i = self.klines.len() - 1;
        if i == 0 {
            self.seed_performance();
            return;
        }
        self.recompute_indicators();
        self.step(i);
    }

    /// Snapshot of the completed simulation. Open positions stay open:
    /// their unrealized P&L shows in the equity curve but not in the
    /// trade statistics.
    pub fn results(&self) -> BacktestResult {
        BacktestResult {
            profit_loss: round2(profit_loss_pct(INITIAL_EQUITY, self.equity)),
            win_rate: round2(win_rate_pct(&self.trades)),
            total_trades: self.trades.len(),
            performance_data: self.performance.clone(),
            klines: self.klines.clone(),
            trade_markers: self.markers.clone(),
        }
    }

    /// Anchor the equity series at the first bar so batch and streaming
    /// runs produce identical curves.
    fn seed_performance(&mut self) {
        if self.performance.is_empty() {
            if let Some(first) = self.klines.first() {
                self.performance.push(EquityPoint {
                    timestamp: first.timestamp,
                    equity: round2(INITIAL_EQUITY),
                });
            }
        }
    }

    /// Recompute every cacheable indicator the strategy references over
    /// the current kline history. PRICE is resolved on demand and never
    /// cached.
    fn recompute_indicators(&mut self) {
        let mut keys: Vec<CacheKey> = Vec::new();
        let mut add = |name: IndicatorName, params| {
            if name != IndicatorName::Price {
                let key = CacheKey { name, params };
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        };

        let groups = self
            .strategy
            .entry_conditions
            .iter()
            .chain(self.strategy.exit_conditions.iter())
            .chain(
                self.strategy
                    .pyramiding
                    .iter()
                    .flat_map(|p| p.conditions.iter()),
            );
        for condition in groups.flat_map(|g| g.conditions.iter()) {
            add(condition.indicator1, condition.indicator1_params);
            if let Operand::Indicator(name) = condition.indicator2 {
                add(name, condition.indicator2_params);
            }
        }

        for key in keys {
            let series = indicator::compute(&self.klines, key.name, &key.params);
            self.cache.insert(key, series);
        }
    }

    /// Stop and take-profit prices for a fill at `price`, per the
    /// strategy's configured offsets.
    fn set_risk_targets(&mut self, price: f64) {
        if let Some(sl) = &self.strategy.stop_loss {
            let amount = risk_amount(price, sl.value, sl.unit);
            self.stop_loss_price = Some(match self.strategy.side {
                PositionSide::Long => price - amount,
                PositionSide::Short => price + amount,
            });
        }
        if let Some(tp) = &self.strategy.take_profit {
            let amount = risk_amount(price, tp.value, tp.unit);
            self.take_profit_price = Some(match self.strategy.side {
                PositionSide::Long => price + amount,
                PositionSide::Short => price - amount,
            });
        }
    }

    /// The per-bar transition shared by batch and streaming modes.
    ///
    /// While in a position: ratchet a trailing stop off the bar close,
    /// then check exits in priority order (stop, take-profit, exit
    /// rules). Stops and take-profits fill at their trigger price, rule
    /// exits at the bar open. A flat engine then checks entry rules and
    /// fills at the bar open. Finally the bar's mark-to-market equity is
    /// sampled.
    fn step(&mut self, i: usize) {
        let kline = self.klines[i];
        let side = self.strategy.side;

        if self.in_position {
            if let (Some(sl), Some(stop)) = (&self.strategy.stop_loss, self.stop_loss_price) {
                if sl.trailing {
                    let amount = risk_amount(kline.close, sl.value, sl.unit);
                    self.stop_loss_price = Some(match side {
                        PositionSide::Long => stop.max(kline.close - amount),
                        PositionSide::Short => stop.min(kline.close + amount),
                    });
                }
            }

            let stop_hit = self.stop_loss_price.filter(|&stop| match side {
                PositionSide::Long => kline.low <= stop,
                PositionSide::Short => kline.high >= stop,
            });
            let tp_hit = self.take_profit_price.filter(|&tp| match side {
                PositionSide::Long => kline.high >= tp,
                PositionSide::Short => kline.low <= tp,
            });

            let exit_price = if stop_hit.is_some() {
                stop_hit
            } else if tp_hit.is_some() {
                tp_hit
            } else if evaluate_groups(&self.strategy.exit_conditions, &self.klines, &self.cache, i)
            {
                Some(kline.open)
            } else {
                None
            };

            if let Some(exit) = exit_price {
                let pnl = match side {
                    PositionSide::Long => (exit - self.entry_price) * self.position_size,
                    PositionSide::Short => (self.entry_price - exit) * self.position_size,
                };
                self.equity += pnl;
                log::debug!(
                    "exit at {:.4} (entry {:.4}, pnl {:.4}, equity {:.2})",
                    exit,
                    self.entry_price,
                    pnl,
                    self.equity
                );
                self.trades.push(Trade {
                    entry: self.entry_price,
                    exit,
                    pnl,
                });
                self.markers.push(TradeMarker {
                    timestamp: kline.timestamp,
                    price: exit,
                    kind: MarkerKind::Exit,
                    side,
                });
                self.in_position = false;
                self.stop_loss_price = None;
                self.take_profit_price = None;
            }
        }

        if !self.in_position
            && kline.open > 0.0
            && evaluate_groups(&self.strategy.entry_conditions, &self.klines, &self.cache, i)
        {
            self.entry_price = kline.open;
            self.position_size =
                self.equity * (self.strategy.position_sizing.amount / 100.0) / self.entry_price;
            self.in_position = true;
            self.set_risk_targets(self.entry_price);
            log::debug!(
                "entry at {:.4} (size {:.6}, stop {:?}, target {:?})",
                self.entry_price,
                self.position_size,
                self.stop_loss_price,
                self.take_profit_price
            );
            self.markers.push(TradeMarker {
                timestamp: kline.timestamp,
                price: self.entry_price,
                kind: MarkerKind::Entry,
                side,
            });
        }

        let marked = if self.in_position {
            let sign = match side {
                PositionSide::Long => 1.0,
                PositionSide::Short => -1.0,
            };
            self.equity + (kline.close - self.entry_price) * self.position_size * sign
        } else {
            self.equity
        };
        self.performance.push(EquityPoint {
            timestamp: kline.timestamp,
            equity: round2(marked),
        });
    }
}
