//! Error types for calcany
//!
//! None of these cross the host boundary: evaluator errors are absorbed by the
//! dispatcher, config errors fall back to defaults.

use thiserror::Error;

/// Errors that can occur in calcany
#[derive(Debug, Error)]
pub enum CalcError {
    /// An evaluator could not make sense of its input
    #[error("Evaluator '{evaluator}' failed: {message}")]
    Evaluator { evaluator: String, message: String },

    /// Localization table errors
    #[error("Localization error: {0}")]
    Localization(String),

    /// Clipboard operation errors
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("Config serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl CalcError {
    pub fn evaluator(evaluator: impl Into<String>, message: impl Into<String>) -> Self {
        CalcError::Evaluator {
            evaluator: evaluator.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for calcany operations
pub type CalcResult<T> = Result<T, CalcError>;
