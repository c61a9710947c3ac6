use model::records::range::RangeError;
use thiserror::Error;

/// Errors raised while loading or validating ingestion settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An env file could not be read.
    #[error("Failed to read env file {path}: {source}")]
    EnvFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An env file line is not `KEY=VALUE`.
    #[error("Invalid env file: {0}")]
    EnvFileSyntax(String),

    /// A variable is present but cannot be parsed.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("{0} must be greater than zero")]
    ZeroSize(&'static str),

    #[error("Invalid identifier range: {0}")]
    Range(#[from] RangeError),

    #[error("{0} must not be empty")]
    Empty(&'static str),
}
