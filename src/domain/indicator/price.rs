//! PRICE pseudo-indicator.
//!
//! Resolved on demand from the kline sequence, never cached.
//! - period 1: the raw source field at the current index.
//! - period > 1 on HIGH/LOW: rolling max/min over the trailing `period`
//!   bars inclusive.
//! - period > 1 on OPEN/CLOSE: the value exactly `period-1` bars in the
//!   past (a pure lag, not an aggregate). This asymmetry is intentional.

use super::IndicatorParams;
use crate::domain::kline::{Kline, Source};

pub fn value_at(klines: &[Kline], params: &IndicatorParams, index: usize) -> Option<f64> {
    if index >= klines.len() {
        return None;
    }

    let period = params.period.unwrap_or(1) as usize;
    let source = params.source.unwrap_or_default();

    if period <= 1 {
        return Some(klines[index].field(source));
    }
    if index + 1 < period {
        return None;
    }

    let window = &klines[index + 1 - period..=index];
    match source {
        Source::High => window
            .iter()
            .map(|k| k.high)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v)))),
        Source::Low => window
            .iter()
            .map(|k| k.low)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v)))),
        Source::Open | Source::Close => Some(klines[index + 1 - period].field(source)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_klines(rows: &[(f64, f64, f64, f64)]) -> Vec<Kline> {
        rows.iter()
            .enumerate()
            .map(|(i, &(open, high, low, close))| Kline {
                timestamp: i as i64 * 3_600_000,
                open,
                high,
                low,
                close,
                volume: 100.0,
            })
            .collect()
    }

    fn params(period: u32, source: Source) -> IndicatorParams {
        IndicatorParams {
            period: Some(period),
            source: Some(source),
            ..Default::default()
        }
    }

    #[test]
    fn period_1_returns_raw_field() {
        let klines = make_klines(&[(10.0, 12.0, 9.0, 11.0)]);
        assert_eq!(value_at(&klines, &params(1, Source::Open), 0), Some(10.0));
        assert_eq!(value_at(&klines, &params(1, Source::Close), 0), Some(11.0));
    }

    #[test]
    fn defaults_to_close_period_1() {
        let klines = make_klines(&[(10.0, 12.0, 9.0, 11.0)]);
        assert_eq!(value_at(&klines, &IndicatorParams::default(), 0), Some(11.0));
    }

    #[test]
    fn rolling_high_is_window_max() {
        let klines = make_klines(&[
            (10.0, 15.0, 9.0, 11.0),
            (11.0, 20.0, 10.0, 12.0),
            (12.0, 13.0, 11.0, 12.5),
        ]);
        assert_eq!(value_at(&klines, &params(3, Source::High), 2), Some(20.0));
        assert_eq!(value_at(&klines, &params(2, Source::High), 2), Some(20.0));
    }

    #[test]
    fn rolling_low_is_window_min() {
        let klines = make_klines(&[
            (10.0, 15.0, 9.0, 11.0),
            (11.0, 20.0, 8.0, 12.0),
            (12.0, 13.0, 11.0, 12.5),
        ]);
        assert_eq!(value_at(&klines, &params(3, Source::Low), 2), Some(8.0));
    }

    #[test]
    fn open_close_is_pure_lag() {
        let klines = make_klines(&[
            (10.0, 15.0, 9.0, 11.0),
            (11.0, 20.0, 8.0, 12.0),
            (12.0, 13.0, 11.0, 12.5),
        ]);
        // period 3 → value from 2 bars back, not a window aggregate.
        assert_eq!(value_at(&klines, &params(3, Source::Close), 2), Some(11.0));
        assert_eq!(value_at(&klines, &params(2, Source::Open), 2), Some(11.0));
    }

    #[test]
    fn undefined_before_lookback() {
        let klines = make_klines(&[(10.0, 15.0, 9.0, 11.0), (11.0, 20.0, 8.0, 12.0)]);
        assert_eq!(value_at(&klines, &params(3, Source::High), 1), None);
        assert_eq!(value_at(&klines, &params(3, Source::Close), 1), None);
    }

    #[test]
    fn out_of_range_index() {
        let klines = make_klines(&[(10.0, 15.0, 9.0, 11.0)]);
        assert_eq!(value_at(&klines, &params(1, Source::Close), 5), None);
    }
}
