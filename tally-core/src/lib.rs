//! Tally Core - Fundamental types
//!
//! This crate provides the core types used throughout Tally:
//! - `Number`: Recorded numeric values (integer, real, imaginary)
//! - `Value`: Unvalidated results handed to the history store
//! - `CalcError`: User-facing calculation errors
//! - `arithmetic`: The four basic operations

pub mod arithmetic;
mod error;
mod number;
mod value;

pub use arithmetic::Operation;
pub use error::{codes, CalcError};
pub use number::{format_imaginary, format_real, Number, NumberError};
pub use value::Value;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{CalcError, Number, Operation, Value};
}
