//! Momentum: x[i] - x[i-period]. Undefined for index < period.

pub const DEFAULT_PERIOD: u32 = 10;

pub fn momentum(data: &[f64], period: usize) -> Vec<Option<f64>> {
    data.iter()
        .enumerate()
        .map(|(i, &value)| {
            if period == 0 || i < period {
                None
            } else {
                Some(value - data[i - period])
            }
        })
        .collect()
}
