//! Market data access ports.

use crate::domain::error::StratforgeError;
use crate::domain::kline::Kline;

/// Batch source of historical bars for a market/timeframe pair.
pub trait KlineSource {
    fn fetch_klines(
        &self,
        market: &str,
        timeframe: &str,
        bars: usize,
    ) -> Result<Vec<Kline>, StratforgeError>;
}

/// Pull-based feed for live simulation. `Ok(None)` means the feed is
/// exhausted; stopping early is just not pulling again.
pub trait KlineFeed {
    fn next_kline(&mut self) -> Result<Option<Kline>, StratforgeError>;
}
