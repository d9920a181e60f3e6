//! Price candle (kline) representation.

use serde::{Deserialize, Serialize};

/// One OHLCV sample for a fixed time interval. Timestamps are Unix
/// epoch milliseconds and must be strictly increasing within a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kline {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Which field of a bar an indicator reads.
///
/// Serialized capitalized ("Close", "Open", ...) for interchange with
/// previously exported strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Source {
    Open,
    High,
    Low,
    #[default]
    Close,
}

impl Kline {
    pub fn field(&self, source: Source) -> f64 {
        match source {
            Source::Open => self.open,
            Source::High => self.high,
            Source::Low => self.low,
            Source::Close => self.close,
        }
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}
