//! Errors surfaced to the user by journal actions.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Everything a journal action can fail with.
///
/// Each variant ends the action that triggered it and nothing else; the
/// caller shows the message and waits for the next user action.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("password incorrect")]
    AuthDenied,

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", parse_message(*row, reason))]
    Parse { row: Option<u64>, reason: String },

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn parse_message(row: Option<u64>, reason: &str) -> String {
    match row {
        Some(row) => format!("malformed row {row}: {reason}"),
        None => format!("malformed file: {reason}"),
    }
}

impl JournalError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(row: Option<u64>, reason: impl Into<String>) -> Self {
        Self::Parse {
            row,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Short category label for the error history.
    pub fn label(&self) -> &'static str {
        match self {
            JournalError::AuthDenied => "AUTH",
            JournalError::Io { .. } => "IO",
            JournalError::Parse { .. } => "PARSE",
            JournalError::InvalidInput { .. } => "INPUT",
            JournalError::Config(_) => "CONFIG",
        }
    }
}
