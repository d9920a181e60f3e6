//! CSV market data adapter.
//!
//! Expects a headered file with `timestamp,open,high,low,close,volume`
//! columns, timestamps in Unix epoch milliseconds, oldest row first.

use std::path::PathBuf;

use crate::domain::error::StratforgeError;
use crate::domain::kline::Kline;
use crate::ports::data_port::KlineSource;

pub struct CsvKlineSource {
    path: PathBuf,
}

impl CsvKlineSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl KlineSource for CsvKlineSource {
    /// Loads the whole file, then keeps the newest `bars` rows. The
    /// market and timeframe are the caller's concern; a file holds
    /// exactly one series.
    fn fetch_klines(
        &self,
        _market: &str,
        _timeframe: &str,
        bars: usize,
    ) -> Result<Vec<Kline>, StratforgeError> {
        let mut reader =
            csv::Reader::from_path(&self.path).map_err(|e| StratforgeError::DataSource {
                reason: format!("cannot open {}: {}", self.path.display(), e),
            })?;

        let mut klines: Vec<Kline> = Vec::new();
        for (row, record) in reader.deserialize::<Kline>().enumerate() {
            let kline = record.map_err(|e| StratforgeError::DataSource {
                reason: format!("{} row {}: {}", self.path.display(), row + 1, e),
            })?;
            if let Some(prev) = klines.last() {
                if kline.timestamp <= prev.timestamp {
                    return Err(StratforgeError::DataSource {
                        reason: format!(
                            "{} row {}: timestamp {} not after {}",
                            self.path.display(),
                            row + 1,
                            kline.timestamp,
                            prev.timestamp
                        ),
                    });
                }
            }
            klines.push(kline);
        }

        if klines.is_empty() {
            return Err(StratforgeError::DataSource {
                reason: format!("{}: no data rows", self.path.display()),
            });
        }
        if klines.len() > bars {
            klines.drain(..klines.len() - bars);
        }
        Ok(klines)
    }
}
