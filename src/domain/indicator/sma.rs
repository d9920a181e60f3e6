//! Simple Moving Average.
//!
//! Mean of the trailing `period` values inclusive of the current index.
//! Undefined for index < period-1.

pub const DEFAULT_PERIOD: u32 = 50;

pub fn sma(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; data.len()];
    if period == 0 {
        return out;
    }

    let mut window_sum = 0.0;
    for i in 0..data.len() {
        window_sum += data[i];
        if i >= period {
            window_sum -= data[i - period];
        }
        if i + 1 >= period {
            out[i] = Some(window_sum / period as f64);
        }
    }
    out
}
