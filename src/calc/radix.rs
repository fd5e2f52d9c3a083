//! Base conversion and bitwise operations (programmer mode)
//!
//! Digits use the alphabet `0-9` then `A-Z`, case-insensitive, truncated to
//! the radix in use. Rendered output is always upper-case.
//!
//! Bitwise operations work on **32-bit two's-complement** integers: the
//! parsed value is wrapped to its low 32 bits before the operation, and
//! negative results render with a leading `-` rather than as a bit pattern.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

pub const MIN_RADIX: u32 = 2;
pub const MAX_RADIX: u32 = 36;

/// The radixes the programmer calculator offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum Radix {
    Binary,
    Octal,
    #[default]
    Decimal,
    Hexadecimal,
}

impl Radix {
    pub const ALL: [Radix; 4] = [
        Self::Binary,
        Self::Octal,
        Self::Decimal,
        Self::Hexadecimal,
    ];

    /// Numeric base
    pub fn value(&self) -> u32 {
        match self {
            Self::Binary => 2,
            Self::Octal => 8,
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
        }
    }

    pub fn from_value(value: u32) -> CalcResult<Self> {
        match value {
            2 => Ok(Self::Binary),
            8 => Ok(Self::Octal),
            10 => Ok(Self::Decimal),
            16 => Ok(Self::Hexadecimal),
            other => Err(CalcError::Validation(format!(
                "Unsupported base {}; use 2, 8, 10 or 16",
                other
            ))),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Binary => "Binary",
            Self::Octal => "Octal",
            Self::Decimal => "Decimal",
            Self::Hexadecimal => "Hexadecimal",
        }
    }

    /// Literal prefix shown in the all-radix view
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Binary => "0b",
            Self::Octal => "0o",
            Self::Decimal => "",
            Self::Hexadecimal => "0x",
        }
    }

    /// Whether `c` is a digit in this radix
    pub fn accepts_digit(&self, c: char) -> bool {
        digit_value(c).is_some_and(|d| d < self.value())
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Base-{})", self.label(), self.value())
    }
}

impl TryFrom<u32> for Radix {
    type Error = CalcError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<Radix> for u32 {
    fn from(radix: Radix) -> Self {
        radix.value()
    }
}

/// Numeric value of a digit character, if it is one (`0-9`, `A-Z`, `a-z`)
pub fn digit_value(c: char) -> Option<u32> {
    c.to_digit(MAX_RADIX)
}

fn check_radix(radix: u32) -> CalcResult<()> {
    if !(MIN_RADIX..=MAX_RADIX).contains(&radix) {
        return Err(CalcError::Validation(format!(
            "Radix must be between {} and {}, got {}",
            MIN_RADIX, MAX_RADIX, radix
        )));
    }
    Ok(())
}

/// Parse a signed integer written in `radix`
pub fn parse_integer(digits: &str, radix: u32) -> CalcResult<i128> {
    check_radix(radix)?;

    let trimmed = digits.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if body.is_empty() {
        return Err(CalcError::Format("Empty number".into()));
    }

    let mut value: i128 = 0;
    for c in body.chars() {
        let digit = digit_value(c)
            .filter(|d| *d < radix)
            .ok_or_else(|| {
                CalcError::Format(format!("'{}' is not a valid base-{} digit", c, radix))
            })?;
        value = value
            .checked_mul(radix as i128)
            .and_then(|v| v.checked_add(digit as i128))
            .ok_or_else(|| CalcError::Format(format!("Number is too large: {}", body)))?;
    }

    Ok(if negative { -value } else { value })
}

/// Render a signed integer in `radix`, upper-case, `-` for negatives
pub fn render_integer(value: i128, radix: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut magnitude = value.unsigned_abs();
    let base = radix.clamp(MIN_RADIX, MAX_RADIX) as u128;
    let mut digits = Vec::new();
    while magnitude > 0 {
        let d = (magnitude % base) as u32;
        digits.push(
            char::from_digit(d, base as u32)
                .unwrap_or('?')
                .to_ascii_uppercase(),
        );
        magnitude /= base;
    }
    if value < 0 {
        digits.push('-');
    }
    digits.iter().rev().collect()
}

/// Re-render `digits` from one radix in another
///
/// Fails with a format error when `digits` has characters outside the
/// source alphabet or does not fit the working integer width.
pub fn convert_base(digits: &str, from_radix: u32, to_radix: u32) -> CalcResult<String> {
    check_radix(to_radix)?;
    let value = parse_integer(digits, from_radix)?;
    Ok(render_integer(value, to_radix))
}

/// The current value in every programmer radix, with prefixes
pub fn representations(digits: &str, radix: Radix) -> CalcResult<Vec<(Radix, String)>> {
    let value = parse_integer(digits, radix.value())?;
    Ok(Radix::ALL
        .iter()
        .map(|r| (*r, format!("{}{}", r.prefix(), render_integer(value, r.value()))))
        .collect())
}

/// Bitwise operations of the programmer keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BitwiseOp {
    Not,
    /// `<< 1`
    ShiftLeft,
    /// Arithmetic `>> 1`
    ShiftRight,
}

impl BitwiseOp {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::ShiftLeft => "LSH",
            Self::ShiftRight => "RSH",
        }
    }

    /// Apply to a 32-bit value with wrapping semantics
    pub fn apply(&self, value: i32) -> i32 {
        match self {
            Self::Not => !value,
            Self::ShiftLeft => value.wrapping_shl(1),
            Self::ShiftRight => value >> 1,
        }
    }
}

impl fmt::Display for BitwiseOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for BitwiseOp {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "not" | "~" => Ok(Self::Not),
            "lsh" | "<<" | "shl" => Ok(Self::ShiftLeft),
            "rsh" | ">>" | "shr" => Ok(Self::ShiftRight),
            other => Err(CalcError::Validation(format!(
                "Unknown bitwise operation: '{}'",
                other
            ))),
        }
    }
}

/// Wrap an integer to 32-bit two's complement
pub fn wrap_i32(value: i128) -> i32 {
    value as i32
}

/// Apply a bitwise operation to `digits` in `radix` and render the result
/// in the same radix
pub fn bitwise(digits: &str, radix: u32, op: BitwiseOp) -> CalcResult<String> {
    let value = wrap_i32(parse_integer(digits, radix)?);
    Ok(render_integer(op.apply(value) as i128, radix))
}
