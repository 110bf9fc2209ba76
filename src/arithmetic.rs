//! Arithmetic module
//!
//! The four operations exposed by the calculator endpoint, plus the
//! number formatting used when results are written into a response body.

use std::fmt;
use std::str::FromStr;

/// Message rendered in place of a result when dividing by zero
pub const DIVISION_BY_ZERO: &str = "Error: División por cero";

/// Supported operations, selected by the `op` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Sumar,
    Restar,
    Multiplicar,
    Dividir,
}

impl Operation {
    pub const ALL: [Self; 4] = [Self::Sumar, Self::Restar, Self::Multiplicar, Self::Dividir];

    /// Wire name of the operation
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sumar => "sumar",
            Self::Restar => "restar",
            Self::Multiplicar => "multiplicar",
            Self::Dividir => "dividir",
        }
    }

    pub fn apply(self, a: f64, b: f64) -> Outcome {
        match self {
            Self::Sumar => Outcome::Value(add(a, b)),
            Self::Restar => Outcome::Value(subtract(a, b)),
            Self::Multiplicar => Outcome::Value(multiply(a, b)),
            Self::Dividir => divide(a, b),
        }
    }
}

/// Error returned when `op` names none of the supported operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperation(pub String);

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operation '{}'", self.0)
    }
}

impl std::error::Error for UnknownOperation {}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of an operation: a number, or the division-by-zero case
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Value(f64),
    DivisionByZero,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.write_str(&format_number(*v)),
            Self::DivisionByZero => f.write_str(DIVISION_BY_ZERO),
        }
    }
}

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// Divide `a` by `b`; a zero divisor (either sign) yields `DivisionByZero`
#[allow(clippy::float_cmp)]
pub fn divide(a: f64, b: f64) -> Outcome {
    if b == 0.0 {
        Outcome::DivisionByZero
    } else {
        Outcome::Value(a / b)
    }
}

/// Render a float for display
///
/// Shortest round-trip digits, fixed notation while the decimal exponent is
/// in `-4..16` and scientific outside it (`1e+20`, `1e-05`). Integral values
/// in fixed notation keep one decimal (`5.0`).
#[allow(clippy::float_cmp)]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    }
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Parse a query value as a float
///
/// Surrounding whitespace is ignored and single underscores between digits
/// are accepted as separators (`1_000`).
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if !trimmed.contains('_') {
        return trimmed.parse::<f64>().ok();
    }

    let chars: Vec<char> = trimmed.chars().collect();
    let mut cleaned = String::with_capacity(trimmed.len());
    for (i, &c) in chars.iter().enumerate() {
        if c != '_' {
            cleaned.push(c);
            continue;
        }
        let after_digit = i > 0 && chars[i - 1].is_ascii_digit();
        let before_digit = chars.get(i + 1).is_some_and(char::is_ascii_digit);
        if !(after_digit && before_digit) {
            return None;
        }
    }
    cleaned.parse::<f64>().ok()
}
