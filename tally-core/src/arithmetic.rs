//! Basic arithmetic
//!
//! Pure functions over `f64`. Only division can fail.

use crate::CalcError;
use std::fmt;

pub fn add(x: f64, y: f64) -> f64 {
    x + y
}

pub fn subtract(x: f64, y: f64) -> f64 {
    x - y
}

pub fn multiply(x: f64, y: f64) -> f64 {
    x * y
}

/// Fails only when the divisor is exactly zero
pub fn divide(x: f64, y: f64) -> Result<f64, CalcError> {
    if y == 0.0 {
        return Err(CalcError::DivisionByZero);
    }
    Ok(x / y)
}

/// Arithmetic operation offered by the calculator menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Name recorded in the history `operation` column
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    pub fn from_name(name: &str) -> Option<Operation> {
        Operation::ALL.into_iter().find(|op| op.name() == name)
    }

    pub fn apply(self, x: f64, y: f64) -> Result<f64, CalcError> {
        match self {
            Operation::Add => Ok(add(x, y)),
            Operation::Subtract => Ok(subtract(x, y)),
            Operation::Multiply => Ok(multiply(x, y)),
            Operation::Divide => divide(x, y),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a real number typed by the user. `NaN` is rejected.
pub fn parse_real(text: &str) -> Result<f64, CalcError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(f) if !f.is_nan() => Ok(f),
        _ => Err(CalcError::invalid_input(format!(
            "could not convert {:?} to a number",
            trimmed
        ))),
    }
}

/// Parse exactly two whitespace-separated numbers ("12 4")
pub fn parse_operands(text: &str) -> Result<(f64, f64), CalcError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(CalcError::invalid_input(format!(
            "expected two numbers separated by space, got {}",
            parts.len()
        )));
    }
    Ok((parse_real(parts[0])?, parse_real(parts[1])?))
}
