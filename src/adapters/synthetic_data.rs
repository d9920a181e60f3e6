//! Synthetic market data generators.
//!
//! Three shapes of fake OHLCV, all driven by a seedable RNG so a given
//! seed always produces the same bars:
//!
//! - [`RandomWalkSource`]: pure noise, up to ±5% per bar.
//! - [`TrendingSource`]: directional drift with periodic trend flips,
//!   closer to how real markets look on a chart.
//! - [`LiveFeedSimulator`]: an endless pull-based feed with smaller
//!   per-bar moves, for streaming simulation.
//!
//! Bars always satisfy low <= min(open, close) <= max(open, close) <= high
//! and carry strictly increasing timestamps.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::error::StratforgeError;
use crate::domain::kline::Kline;
use crate::ports::data_port::{KlineFeed, KlineSource};

/// Bar interval in milliseconds for a timeframe label ("1m", "1h", "1d"
/// and friends). Unknown labels fall back to one hour.
pub fn timeframe_ms(timeframe: &str) -> i64 {
    match timeframe {
        "1m" => 60_000,
        "5m" => 300_000,
        "15m" => 900_000,
        "30m" => 1_800_000,
        "1h" => 3_600_000,
        "4h" => 14_400_000,
        "1d" => 86_400_000,
        _ => 3_600_000,
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Trendless random walk around a starting price near 50k.
pub struct RandomWalkSource {
    seed: u64,
    end_ms: i64,
}

impl RandomWalkSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            end_ms: now_ms(),
        }
    }

    /// Anchor the newest bar at a fixed timestamp instead of "now".
    pub fn anchored(seed: u64, end_ms: i64) -> Self {
        Self { seed, end_ms }
    }
}

impl KlineSource for RandomWalkSource {
    fn fetch_klines(
        &self,
        _market: &str,
        timeframe: &str,
        bars: usize,
    ) -> Result<Vec<Kline>, StratforgeError> {
        let interval = timeframe_ms(timeframe);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut last_close = 50_000.0 + (rng.random::<f64>() - 0.5) * 10_000.0;
        let mut klines = Vec::with_capacity(bars);
        for i in 0..bars {
            let open = last_close;
            let change = (rng.random::<f64>() - 0.49) * open * 0.05;
            let close = open + change;
            let high = open.max(close) + rng.random::<f64>() * open * 0.02;
            let low = open.min(close) - rng.random::<f64>() * open * 0.02;
            klines.push(Kline {
                timestamp: self.end_ms - (bars as i64 - i as i64) * interval,
                open,
                high,
                low,
                close,
                volume: rng.random::<f64>() * 1000.0,
            });
            last_close = close;
        }
        Ok(klines)
    }
}

/// Random walk with a drift term that flips direction at five evenly
/// spaced points across the series.
pub struct TrendingSource {
    seed: u64,
    end_ms: i64,
}

impl TrendingSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            end_ms: now_ms(),
        }
    }

    pub fn anchored(seed: u64, end_ms: i64) -> Self {
        Self { seed, end_ms }
    }
}

impl KlineSource for TrendingSource {
    fn fetch_klines(
        &self,
        _market: &str,
        timeframe: &str,
        bars: usize,
    ) -> Result<Vec<Kline>, StratforgeError> {
        let interval = timeframe_ms(timeframe);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut last_close = 40_000.0;
        let mut trend: f64 = if rng.random::<f64>() > 0.5 { 1.0 } else { -1.0 };
        let flip_every = (bars / 5).max(1);
        let mut klines = Vec::with_capacity(bars);
        for i in 0..bars {
            if i > 0 && i % flip_every == 0 && rng.random::<f64>() > 0.4 {
                trend = -trend;
            }
            let open = last_close;
            let drift = trend * rng.random::<f64>() * open * 0.01;
            let noise = (rng.random::<f64>() - 0.5) * open * 0.03;
            let close = open + drift + noise;
            let high = open.max(close) + rng.random::<f64>() * open * 0.015;
            let low = open.min(close) - rng.random::<f64>() * open * 0.015;
            klines.push(Kline {
                timestamp: self.end_ms - (bars as i64 - i as i64) * interval,
                open,
                high,
                low,
                close,
                volume: rng.random::<f64>() * 1500.0 + 500.0,
            });
            last_close = close;
        }
        Ok(klines)
    }
}

/// Endless bar feed with small per-bar moves and a trend that flips with
/// 5% probability per bar. The feed never ends; callers decide how many
/// bars to pull.
pub struct LiveFeedSimulator {
    rng: StdRng,
    last_close: f64,
    trend: f64,
    next_timestamp: i64,
    interval_ms: i64,
}

impl LiveFeedSimulator {
    pub fn new(seed: u64, interval_ms: i64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let last_close = 50_000.0 + (rng.random::<f64>() - 0.5) * 10_000.0;
        let trend = if rng.random::<f64>() > 0.5 { 1.0 } else { -1.0 };
        Self {
            rng,
            last_close,
            trend,
            next_timestamp: now_ms(),
            interval_ms: interval_ms.max(1),
        }
    }

    pub fn anchored(seed: u64, interval_ms: i64, start_ms: i64) -> Self {
        let mut feed = Self::new(seed, interval_ms);
        feed.next_timestamp = start_ms;
        feed
    }
}

impl KlineFeed for LiveFeedSimulator {
    fn next_kline(&mut self) -> Result<Option<Kline>, StratforgeError> {
        if self.rng.random::<f64>() < 0.05 {
            self.trend = -self.trend;
        }
        let open = self.last_close;
        let drift = self.trend * self.rng.random::<f64>() * open * 0.005;
        let noise = (self.rng.random::<f64>() - 0.5) * open * 0.01;
        let close = open + drift + noise;
        let high = open.max(close) + self.rng.random::<f64>() * open * 0.005;
        let low = open.min(close) - self.rng.random::<f64>() * open * 0.005;
        let kline = Kline {
            timestamp: self.next_timestamp,
            open,
            high,
            low,
            close,
            volume: self.rng.random::<f64>() * 200.0 + 50.0,
        };
        self.last_close = close;
        self.next_timestamp += self.interval_ms;
        Ok(Some(kline))
    }
}
