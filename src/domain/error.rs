//! Domain error types.

/// Top-level error type for stockpages.
#[derive(Debug, thiserror::Error)]
pub enum StockPagesError {
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

    #[error("{what} not found: {path}")]
    InputMissing { what: &'static str, path: String },

    #[error("failed to read dataset {path}: {reason}")]
    DatasetRead { path: String, reason: String },

    #[error("invalid rankings file {path}: {reason}")]
    RankingsInvalid { path: String, reason: String },

    #[error("symbol is required")]
    SymbolRequired,

    #[error("symbol not found in dataset: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("failed to render page: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StockPagesError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            StockPagesError::Io(_) => 1,
            StockPagesError::ConfigParse { .. }
            | StockPagesError::ConfigMissing { .. }
            | StockPagesError::ConfigInvalid { .. } => 2,
            StockPagesError::InputMissing { .. } | StockPagesError::DatasetRead { .. } => 3,
            StockPagesError::RankingsInvalid { .. } => 4,
            StockPagesError::SymbolRequired | StockPagesError::SymbolNotFound { .. } => 5,
            StockPagesError::Render { .. } => 6,
        }
    }
}

impl From<&StockPagesError> for std::process::ExitCode {
    fn from(err: &StockPagesError) -> Self {
        std::process::ExitCode::from(err.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_input() {
        let err = StockPagesError::InputMissing {
            what: "template",
            path: "stock-details.html".into(),
        };
        assert_eq!(err.to_string(), "template not found: stock-details.html");

        let err = StockPagesError::SymbolNotFound {
            symbol: "ZZZ".into(),
        };
        assert_eq!(err.to_string(), "symbol not found in dataset: ZZZ");
    }

    #[test]
    fn io_errors_convert() {
        let err: StockPagesError = std::io::Error::other("disk full").into();
        assert!(matches!(err, StockPagesError::Io(_)));
    }
}
