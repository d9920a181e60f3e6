//! Wilder-smoothed Relative Strength Index.
//!
//! Per-bar gains/losses come from consecutive closes. The seed average
//! gain/loss is the sum over the first `period-1` differences divided by
//! `period`; later samples smooth with weight (period-1)/period on history
//! plus 1/period on the new sample. RSI is 100 when the average loss is
//! zero. Undefined before the seed point.

pub const DEFAULT_PERIOD: u32 = 14;

pub fn rsi(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; data.len()];
    if period == 0 || data.len() < period {
        return out;
    }

    let mut gains = Vec::with_capacity(data.len() - 1);
    let mut losses = Vec::with_capacity(data.len() - 1);
    for i in 1..data.len() {
        let change = data[i] - data[i - 1];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let p = period as f64;
    let mut avg_gain = gains[..period - 1].iter().sum::<f64>() / p;
    let mut avg_loss = losses[..period - 1].iter().sum::<f64>() / p;

    for i in (period - 1)..gains.len() {
        avg_gain = (avg_gain * (p - 1.0) + gains[i]) / p;
        avg_loss = (avg_loss * (p - 1.0) + losses[i]) / p;

        out[i + 1] = Some(if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        });
    }
    out
}
