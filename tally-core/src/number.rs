//! Recorded numbers
//!
//! A `Number` is what the history file stores in its `x`, `y` and `result`
//! columns. Rendering and parsing are exact inverses so a record read back
//! from disk compares equal to the one that was written.

use dashu_int::IBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for number parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0:?}")]
    ParseError(String),
}

/// Numeric value produced or consumed by a calculation
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// Exact integer (operands and factorial results)
    Integer(IBig),
    /// Real number, always rendered with a decimal point or exponent
    Real(f64),
    /// Purely imaginary value, stored as its magnitude and rendered `Nj`
    Imaginary(f64),
}

impl Number {
    pub fn from_i64(n: i64) -> Self {
        Number::Integer(IBig::from(n))
    }

    pub fn is_imaginary(&self) -> bool {
        matches!(self, Number::Imaginary(_))
    }
}

/// Render an imaginary magnitude the way the history file expects it:
/// integral magnitudes without a decimal point, others at full precision.
pub fn format_imaginary(magnitude: f64) -> String {
    if magnitude.is_finite() && magnitude.fract() == 0.0 {
        format!("{:.0}j", magnitude)
    } else {
        format!("{}j", magnitude)
    }
}

/// Render a real so it always reads as a float (`3.0`, `2.5`, `1e20`)
pub fn format_real(value: f64) -> String {
    format!("{:?}", value)
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(&['-', '+'][..]).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn parse_float(s: &str, original: &str) -> Result<f64, NumberError> {
    match s.parse::<f64>() {
        Ok(f) if !f.is_nan() => Ok(f),
        _ => Err(NumberError::ParseError(original.to_string())),
    }
}

impl FromStr for Number {
    type Err = NumberError;

    /// Accepts "120", "-4", "3.0", "1e20", "inf" and "2j"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Some(magnitude) = trimmed.strip_suffix('j') {
            return parse_float(magnitude, s).map(Number::Imaginary);
        }

        if is_integer_literal(trimmed) {
            let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
            return digits
                .parse::<IBig>()
                .map(Number::Integer)
                .map_err(|_| NumberError::ParseError(s.to_string()));
        }

        parse_float(trimmed, s).map(Number::Real)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Real(r) => f.write_str(&format_real(*r)),
            Number::Imaginary(m) => f.write_str(&format_imaginary(*m)),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::from_i64(n)
    }
}

impl From<IBig> for Number {
    fn from(n: IBig) -> Self {
        Number::Integer(n)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Real(f)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
