//! Trade log, markers, equity samples, and aggregate statistics.

use serde::{Deserialize, Serialize};

use crate::domain::kline::Kline;
use crate::domain::strategy::PositionSide;

/// One completed round trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub entry: f64,
    pub exit: f64,
    pub pnl: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Entry,
    Exit,
}

/// Chart annotation for one fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeMarker {
    pub timestamp: i64,
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: MarkerKind,
    pub side: PositionSide,
}

/// Mark-to-market account value at one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: i64,
    pub equity: f64,
}

/// Complete snapshot returned by the engine: either this whole struct or
/// an error, never a partial result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestResult {
    pub profit_loss: f64,
    pub win_rate: f64,
    pub total_trades: usize,
    pub performance_data: Vec<EquityPoint>,
    pub klines: Vec<Kline>,
    pub trade_markers: Vec<TradeMarker>,
}

/// Round to 2 decimal places, the precision of every reported figure.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 100 × winners / total, 0 when there are no trades.
pub fn win_rate_pct(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let wins = trades.iter().filter(|t| t.pnl > 0.0).count();
    100.0 * wins as f64 / trades.len() as f64
}

/// 100 × (final - initial) / initial.
pub fn profit_loss_pct(initial_equity: f64, final_equity: f64) -> f64 {
    100.0 * (final_equity - initial_equity) / initial_equity
}
