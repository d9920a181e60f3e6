//! Moving Average Convergence Divergence.
//!
//! macd line = EMA(fast) - EMA(slow), defined only where both are.
//! Signal line = EMA(signal) over the *compacted* sequence of defined
//! macd values (warmup gaps removed before smoothing, then realigned
//! positionally). A point is defined only where both the macd line and
//! the signal line are.

use super::ema::ema;
use super::MacdPoint;

pub const DEFAULT_FAST: u32 = 12;
pub const DEFAULT_SLOW: u32 = 26;
pub const DEFAULT_SIGNAL: u32 = 9;

pub fn macd(data: &[f64], fast: usize, slow: usize, signal: usize) -> Vec<Option<MacdPoint>> {
    let mut out = vec![None; data.len()];
    if fast == 0 || slow == 0 || signal == 0 {
        return out;
    }

    let ema_fast = ema(data, fast);
    let ema_slow = ema(data, slow);

    let macd_line: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let compacted: Vec<f64> = macd_line.iter().copied().flatten().collect();
    let signal_line = ema(&compacted, signal);

    let mut signal_idx = 0;
    for (i, line) in macd_line.iter().enumerate() {
        if let Some(line) = *line {
            if let Some(Some(signal)) = signal_line.get(signal_idx) {
                out[i] = Some(MacdPoint {
                    line,
                    signal: *signal,
                    histogram: line - signal,
                });
            }
            signal_idx += 1;
        }
    }
    out
}
