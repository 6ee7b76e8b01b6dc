use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    /// The caller tried to record a missing or non-numeric result
    #[error("Invalid result: {0}")]
    InvalidResult(String),

    /// The history file exists but does not follow the schema
    #[error("Corrupt history file {} at line {line}: {reason}", .path.display())]
    Corrupt {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("History I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl HistoryError {
    pub fn invalid_result(details: impl Into<String>) -> Self {
        Self::InvalidResult(details.into())
    }

    pub fn is_invalid_result(&self) -> bool {
        matches!(self, HistoryError::InvalidResult(_))
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, HistoryError::Corrupt { .. })
    }
}
