//! Domain error types.

use std::path::PathBuf;

/// Top-level error type for market-briefing.
#[derive(Debug, thiserror::Error)]
pub enum BriefingError {
    #[error("quote provider error for {symbol}: {reason}")]
    Provider { symbol: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to render report: {reason}")]
    Render { reason: String },

    #[error("failed to write {}: {source}", path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BriefingError {
    pub fn sink(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BriefingError::Sink {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            BriefingError::Sink { .. }
            | BriefingError::Csv(_)
            | BriefingError::Io(_)
            | BriefingError::Render { .. } => 1,
            BriefingError::ConfigParse { .. } | BriefingError::ConfigInvalid { .. } => 2,
            BriefingError::Provider { .. } => 3,
        }
    }
}

impl From<&BriefingError> for std::process::ExitCode {
    fn from(err: &BriefingError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
