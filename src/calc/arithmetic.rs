//! Binary operators, unary scientific functions and result rendering
//!
//! Everything here is a pure function over `f64`. The calculator state
//! machine in `state.rs` decides when these are applied.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// A pending binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// `a ^ b`
    Power,
    /// The `b`-th root of `a`
    Root,
}

impl Operator {
    /// Symbol used in the equation line and history entries
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Power => "^",
            Self::Root => "root",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "+" | "add" | "plus" => Ok(Self::Add),
            "-" | "sub" | "subtract" | "minus" => Ok(Self::Subtract),
            "*" | "x" | "×" | "mul" | "multiply" => Ok(Self::Multiply),
            "/" | "÷" | "div" | "divide" => Ok(Self::Divide),
            "^" | "pow" | "power" => Ok(Self::Power),
            "root" | "yroot" => Ok(Self::Root),
            other => Err(CalcError::Validation(format!(
                "Unknown operator: '{}'",
                other
            ))),
        }
    }
}

/// Apply a binary operator
///
/// `+ - × ^` are total. Division by zero and roots of non-positive degree
/// fail with a domain error, as do even roots of negative numbers.
pub fn calculate(a: f64, b: f64, op: Operator) -> CalcResult<f64> {
    match op {
        Operator::Add => Ok(a + b),
        Operator::Subtract => Ok(a - b),
        Operator::Multiply => Ok(a * b),
        Operator::Divide => {
            if b == 0.0 {
                return Err(CalcError::divide_by_zero());
            }
            Ok(a / b)
        }
        Operator::Power => Ok(a.powf(b)),
        Operator::Root => nth_root(a, b),
    }
}

fn nth_root(value: f64, degree: f64) -> CalcResult<f64> {
    if degree == 0.0 {
        return Err(CalcError::Domain("Cannot take a zeroth root".into()));
    }
    if degree < 0.0 {
        return Err(CalcError::Domain(
            "Cannot take a root with a negative exponent".into(),
        ));
    }
    if value < 0.0 {
        // Odd integer degrees have a real root for negative input
        if degree.fract() == 0.0 && degree % 2.0 != 0.0 {
            return Ok(-(-value).powf(1.0 / degree));
        }
        return Err(CalcError::Domain(
            "Cannot take an even root of a negative number".into(),
        ));
    }
    Ok(value.powf(1.0 / degree))
}

/// Unary scientific functions applied directly to the display value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScientificFn {
    Sqrt,
    Square,
    Cube,
    /// Sine of an angle in degrees
    Sin,
    /// Cosine of an angle in degrees
    Cos,
    /// Tangent of an angle in degrees
    Tan,
    /// Base-10 logarithm
    Log,
    /// Natural logarithm
    Ln,
}

impl ScientificFn {
    pub const ALL: [ScientificFn; 8] = [
        Self::Sqrt,
        Self::Square,
        Self::Cube,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Log,
        Self::Ln,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Square => "square",
            Self::Cube => "cube",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Ln => "ln",
        }
    }

    /// Evaluate the function
    pub fn apply(&self, x: f64) -> CalcResult<f64> {
        match self {
            Self::Sqrt => {
                if x < 0.0 {
                    return Err(CalcError::Domain(
                        "Cannot calculate square root of negative number".into(),
                    ));
                }
                Ok(x.sqrt())
            }
            Self::Square => Ok(x.powi(2)),
            Self::Cube => Ok(x.powi(3)),
            Self::Sin => Ok(x.to_radians().sin()),
            Self::Cos => Ok(x.to_radians().cos()),
            Self::Tan => Ok(x.to_radians().tan()),
            Self::Log => {
                if x <= 0.0 {
                    return Err(CalcError::Domain(
                        "Cannot calculate logarithm of non-positive number".into(),
                    ));
                }
                Ok(x.log10())
            }
            Self::Ln => {
                if x <= 0.0 {
                    return Err(CalcError::Domain(
                        "Cannot calculate natural logarithm of non-positive number".into(),
                    ));
                }
                Ok(x.ln())
            }
        }
    }
}

impl fmt::Display for ScientificFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScientificFn {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == lower)
            .or(match lower.as_str() {
                "log10" => Some(Self::Log),
                "sq" | "x2" => Some(Self::Square),
                _ => None,
            })
            .ok_or_else(|| CalcError::Validation(format!("Unknown function: '{}'", s.trim())))
    }
}

/// Render a result with at most `precision` decimals, trailing zeros stripped
///
/// Magnitudes outside `[1e-7, 1e21)` switch to exponential notation. The
/// output always parses back with `str::parse::<f64>()`.
pub fn format_result(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-7 {
        let formatted = format!("{:.*e}", precision, value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => format!("{}e{}", trim_fraction(mantissa), exponent),
            None => formatted,
        };
    }

    let fixed = trim_fraction(&format!("{:.*}", precision, value));
    if fixed == "-0" {
        "0".to_string()
    } else {
        fixed
    }
}

/// Strip trailing zeros (and a dangling separator) from a decimal string
pub fn trim_fraction(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
