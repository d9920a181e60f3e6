//! Exponential Moving Average.
//!
//! k = 2/(period+1); seeded at index period-1 with the SMA of the first
//! `period` values, then ema[i] = (x[i] - ema[i-1]) * k + ema[i-1].
//! Undefined for index < period-1.

pub const DEFAULT_PERIOD: u32 = 20;

pub fn ema(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; data.len()];
    if period == 0 {
        return out;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut prev: Option<f64> = None;
    let mut seed_sum = 0.0;

    for i in 0..data.len() {
        match prev {
            None => {
                seed_sum += data[i];
                if i + 1 == period {
                    let seed = seed_sum / period as f64;
                    out[i] = Some(seed);
                    prev = Some(seed);
                }
            }
            Some(p) => {
                let next = (data[i] - p) * k + p;
                out[i] = Some(next);
                prev = Some(next);
            }
        }
    }
    out
}
