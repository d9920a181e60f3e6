//! Average True Range.
//!
//! True range per bar = max(high-low, |high-prev_close|, |low-prev_close|),
//! with the first bar's true range being high-low. ATR is the EMA(period)
//! of the true-range series.

use super::ema::ema;
use crate::domain::kline::Kline;

pub const DEFAULT_PERIOD: u32 = 14;

pub fn atr(klines: &[Kline], period: usize) -> Vec<Option<f64>> {
    let mut true_ranges = Vec::with_capacity(klines.len());
    for (i, kline) in klines.iter().enumerate() {
        let tr = if i == 0 {
            kline.high - kline.low
        } else {
            kline.true_range(klines[i - 1].close)
        };
        true_ranges.push(tr);
    }
    ema(&true_ranges, period)
}
