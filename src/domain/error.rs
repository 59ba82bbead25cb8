//! Domain error types.

/// Top-level error type for marketperf.
#[derive(Debug, thiserror::Error)]
pub enum MarketPerfError {
    #[error("provider error for {symbol}: {reason}")]
    Provider { symbol: String, reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("malformed table: {reason}")]
    Table { reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&MarketPerfError> for std::process::ExitCode {
    fn from(err: &MarketPerfError) -> Self {
        let code: u8 = match err {
            MarketPerfError::Io(_) | MarketPerfError::Csv(_) | MarketPerfError::Table { .. } => 1,
            MarketPerfError::ConfigParse { .. } | MarketPerfError::ConfigInvalid { .. } => 2,
            MarketPerfError::Provider { .. } | MarketPerfError::NoData { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_symbol() {
        let err = MarketPerfError::Provider {
            symbol: "^GSPC".into(),
            reason: "timeout".into(),
        };
        assert_eq!(err.to_string(), "provider error for ^GSPC: timeout");
    }

    #[test]
    fn config_invalid_display() {
        let err = MarketPerfError::ConfigInvalid {
            section: "provider".into(),
            key: "kind".into(),
            reason: "unknown provider".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value [provider] kind: unknown provider"
        );
    }

    #[test]
    fn io_converts_via_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: MarketPerfError = io.into();
        assert!(matches!(err, MarketPerfError::Io(_)));
    }
}
