use std::path::PathBuf;
use tally_core::CalcError;
use tally_history::HistoryError;
use thiserror::Error;

/// Fault raised by a plugin's own logic
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("no input provided")]
    EndOfInput,

    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure observed at the registry boundary
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("no plugin named '{name}' in {}{}", .dir.display(), similar_hint(.suggestions))]
    NotFound {
        name: String,
        dir: PathBuf,
        suggestions: Vec<String>,
    },

    #[error("'{0}' is not a valid plugin name")]
    InvalidName(String),

    #[error("plugin '{0}' is listed but has no implementation")]
    Unregistered(String),

    #[error("{reason}")]
    Execution { name: String, reason: String },

    #[error("plugin panicked: {reason}")]
    Panicked { name: String, reason: String },
}

impl PluginError {
    /// Resolution failures, as opposed to faults while running
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            PluginError::NotFound { .. } | PluginError::InvalidName(_) | PluginError::Unregistered(_)
        )
    }
}

fn similar_hint(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (similar: {})", suggestions.join(", "))
    }
}
