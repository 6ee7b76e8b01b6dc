//! Calculation errors
//!
//! User-facing failures. None of them end a session: the REPL reports the
//! message and shows the menu again.

use crate::NumberError;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Text that could not be parsed into the required numeric type
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// Valid number outside the operation's domain (e.g. negative factorial)
    #[error("{0}")]
    DomainError(String),
}

impl CalcError {
    pub fn invalid_input(details: impl Into<String>) -> Self {
        Self::InvalidInput(details.into())
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::DomainError(details.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput(_) => codes::INVALID_INPUT,
            CalcError::DivisionByZero => codes::DIV_ZERO,
            CalcError::DomainError(_) => codes::DOMAIN_ERROR,
        }
    }
}

impl From<NumberError> for CalcError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::ParseError(s) => {
                Self::invalid_input(format!("could not convert {:?} to a number", s))
            }
        }
    }
}
