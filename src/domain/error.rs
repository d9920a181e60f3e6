//! Domain error types.
//!
//! Insufficient indicator lookback is deliberately NOT an error: it
//! yields an undefined value and the affected condition simply does not
//! fire. Errors here are for IO, malformed inputs, and external-service
//! failures.

/// Top-level error type for stratforge.
#[derive(Debug, thiserror::Error)]
pub enum StratforgeError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("strategy JSON error: {0}")]
    StrategyJson(#[from] serde_json::Error),

    #[error("invalid strategy: {reason}")]
    StrategyInvalid { reason: String },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    /// Strategy generation happens before an engine exists, so this is
    /// always safe to retry.
    #[error("strategy generation failed: {reason}")]
    Generation { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StratforgeError> for std::process::ExitCode {
    fn from(err: &StratforgeError) -> Self {
        let code: u8 = match err {
            StratforgeError::Io(_) => 1,
            StratforgeError::ConfigParse { .. }
            | StratforgeError::ConfigMissing { .. }
            | StratforgeError::ConfigInvalid { .. } => 2,
            StratforgeError::StrategyJson(_) | StratforgeError::StrategyInvalid { .. } => 3,
            StratforgeError::DataSource { .. } => 4,
            StratforgeError::Generation { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
