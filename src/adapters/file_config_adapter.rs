//! INI file configuration adapter.
//!
//! Recognised settings:
//!
//! ```ini
//! [backtest]
//! bars = 1000
//!
//! [feed]
//! interval_ms = 2000
//!
//! [data]
//! klines_path = ./klines.csv
//! ```

use configparser::ini::Ini;
use std::path::Path;

use crate::domain::error::StratforgeError;
use crate::ports::config_port::ConfigPort;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StratforgeError> {
        let file = path.as_ref().display().to_string();
        let mut config = Ini::new();
        config
            .load(path.as_ref())
            .map_err(|reason| StratforgeError::ConfigParse { file, reason })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, StratforgeError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| StratforgeError::ConfigParse {
                file: "<inline>".into(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> Result<i64, StratforgeError> {
        match self.config.get(section, key) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| StratforgeError::ConfigInvalid {
                    section: section.into(),
                    key: key.into(),
                    reason: format!("'{}' is not an integer", raw),
                }),
        }
    }

    fn get_float(&self, section: &str, key: &str, default: f64) -> Result<f64, StratforgeError> {
        match self.config.get(section, key) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| StratforgeError::ConfigInvalid {
                    section: section.into(),
                    key: key.into(),
                    reason: format!("'{}' is not a number", raw),
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "[backtest]\nbars = 250\n\n[feed]\ninterval_ms = 500\n\n[data]\nklines_path = /tmp/klines.csv\n";

    #[test]
    fn reads_known_sections() {
        let config = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(config.get_int("backtest", "bars", 1000).unwrap(), 250);
        assert_eq!(config.get_int("feed", "interval_ms", 2000).unwrap(), 500);
        assert_eq!(
            config.get_string("data", "klines_path"),
            Some("/tmp/klines.csv".to_string())
        );
    }

    #[test]
    fn missing_key_falls_back_to_default() {
        let config = FileConfigAdapter::from_string("[backtest]\n").unwrap();
        assert_eq!(config.get_int("backtest", "bars", 1000).unwrap(), 1000);
        assert_eq!(config.get_float("backtest", "fee", 0.1).unwrap(), 0.1);
        assert_eq!(config.get_string("data", "klines_path"), None);
    }

    #[test]
    fn malformed_value_is_an_error_not_a_default() {
        let config = FileConfigAdapter::from_string("[backtest]\nbars = many\n").unwrap();
        let err = config.get_int("backtest", "bars", 1000).unwrap_err();
        assert!(matches!(err, StratforgeError::ConfigInvalid { .. }));
        assert!(err.to_string().contains("bars"));
    }

    #[test]
    fn float_values_parse() {
        let config = FileConfigAdapter::from_string("[backtest]\nfee = 0.25\n").unwrap();
        assert_eq!(config.get_float("backtest", "fee", 0.0).unwrap(), 0.25);
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let config = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(config.get_int("backtest", "bars", 1000).unwrap(), 250);
    }

    #[test]
    fn missing_file_is_a_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/stratforge.ini").unwrap_err();
        assert!(matches!(err, StratforgeError::ConfigParse { .. }));
    }
}
