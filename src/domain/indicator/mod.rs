//! Technical indicator library.
//!
//! Each calculator takes a numeric series (or the full kline sequence) and
//! returns a series of the same length where positions lacking sufficient
//! lookback are `None`. Indicators never fail: insufficient data yields
//! `None`, which propagates to condition evaluation as "cannot fire".
//!
//! PRICE is a pseudo-indicator resolved on demand from the kline sequence
//! (see [`price`]) and is never cached.

pub mod atr;
pub mod ema;
pub mod macd;
pub mod momentum;
pub mod price;
pub mod rsi;
pub mod sma;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::domain::kline::{Kline, Source};

/// Indicator identity. Serialized as the original enum strings
/// ("RSI", "MACD", ...) for strategy interchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorName {
    Rsi,
    Macd,
    Sma,
    Ema,
    Price,
    Atr,
    Momentum,
}

/// Per-indicator parameters as they appear in strategy JSON. Absent
/// fields fall back to the per-indicator defaults at computation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slow: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<u32>,
}

/// One defined MACD sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// A precomputed indicator series aligned index-for-index with the
/// kline sequence it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorSeries {
    Simple(Vec<Option<f64>>),
    Macd(Vec<Option<MacdPoint>>),
}

impl IndicatorSeries {
    /// The scalar exposed to condition evaluation: the value itself for
    /// simple indicators, the macd line for MACD.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        match self {
            IndicatorSeries::Simple(values) => values.get(index).copied().flatten(),
            IndicatorSeries::Macd(values) => {
                values.get(index).copied().flatten().map(|p| p.line)
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            IndicatorSeries::Simple(values) => values.len(),
            IndicatorSeries::Macd(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cache key: indicator identity plus its raw (un-defaulted) parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub name: IndicatorName,
    pub params: IndicatorParams,
}

/// Indicator series keyed by name + params, fully recomputed whenever the
/// kline sequence changes. PRICE is excluded.
pub type IndicatorCache = HashMap<CacheKey, IndicatorSeries>;

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            IndicatorName::Macd => write!(
                f,
                "MACD({},{},{})",
                self.params.fast.unwrap_or(macd::DEFAULT_FAST),
                self.params.slow.unwrap_or(macd::DEFAULT_SLOW),
                self.params.signal.unwrap_or(macd::DEFAULT_SIGNAL),
            ),
            name => {
                let label = match name {
                    IndicatorName::Rsi => "RSI",
                    IndicatorName::Sma => "SMA",
                    IndicatorName::Ema => "EMA",
                    IndicatorName::Price => "PRICE",
                    IndicatorName::Atr => "ATR",
                    IndicatorName::Momentum => "MOMENTUM",
                    IndicatorName::Macd => unreachable!(),
                };
                match self.params.period {
                    Some(p) => write!(f, "{}({})", label, p),
                    None => write!(f, "{}", label),
                }
            }
        }
    }
}

/// Extract the configured source field from every kline.
pub fn source_values(klines: &[Kline], source: Source) -> Vec<f64> {
    klines.iter().map(|k| k.field(source)).collect()
}

/// Compute the full series for one cacheable indicator over the klines
/// observed so far. PRICE is not cacheable and yields an all-`None`
/// series here; callers resolve it through [`price::value_at`] instead.
pub fn compute(klines: &[Kline], name: IndicatorName, params: &IndicatorParams) -> IndicatorSeries {
    let source = params.source.unwrap_or_default();
    let period = |default: u32| params.period.unwrap_or(default) as usize;

    match name {
        IndicatorName::Sma => IndicatorSeries::Simple(sma::sma(
            &source_values(klines, source),
            period(sma::DEFAULT_PERIOD),
        )),
        IndicatorName::Ema => IndicatorSeries::Simple(ema::ema(
            &source_values(klines, source),
            period(ema::DEFAULT_PERIOD),
        )),
        IndicatorName::Rsi => IndicatorSeries::Simple(rsi::rsi(
            &source_values(klines, source),
            period(rsi::DEFAULT_PERIOD),
        )),
        IndicatorName::Macd => IndicatorSeries::Macd(macd::macd(
            &source_values(klines, source),
            params.fast.unwrap_or(macd::DEFAULT_FAST) as usize,
            params.slow.unwrap_or(macd::DEFAULT_SLOW) as usize,
            params.signal.unwrap_or(macd::DEFAULT_SIGNAL) as usize,
        )),
        IndicatorName::Atr => {
            IndicatorSeries::Simple(atr::atr(klines, period(atr::DEFAULT_PERIOD)))
        }
        IndicatorName::Momentum => IndicatorSeries::Simple(momentum::momentum(
            &source_values(klines, source),
            period(momentum::DEFAULT_PERIOD),
        )),
        IndicatorName::Price => IndicatorSeries::Simple(vec![None; klines.len()]),
    }
}
