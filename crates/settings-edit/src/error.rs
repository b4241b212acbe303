//! Error types for settings rewriting

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors that can occur while rewriting a settings file
#[derive(Debug, Error)]
pub enum RewriteError {
    /// A setting line has no `=` while validation is enabled
    #[error("Invalid config file: key '{key}' has no value on line {line}")]
    MissingValue {
        /// The offending line, as it appeared in the input
        key: String,
        /// 1-based line number
        line: usize,
    },

    /// The output buffer could not grow
    #[error("Failed to grow output buffer: {0}")]
    Allocation(#[from] TryReserveError),
}

impl RewriteError {
    /// Line number the error was detected on, if it is tied to a line
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MissingValue { line, .. } => Some(*line),
            Self::Allocation(_) => None,
        }
    }
}
