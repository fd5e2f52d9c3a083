//! Unit conversion over static ratio tables
//!
//! Linear categories convert through their base unit (ratio 1).
//! Temperature pivots through Celsius.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

const LENGTH: &[(&str, f64)] = &[
    ("m", 1.0),
    ("km", 1000.0),
    ("cm", 0.01),
    ("mm", 0.001),
    ("mile", 1609.34),
    ("yard", 0.9144),
    ("foot", 0.3048),
    ("inch", 0.0254),
];

const MASS: &[(&str, f64)] = &[
    ("kg", 1.0),
    ("g", 0.001),
    ("mg", 0.000001),
    ("lb", 0.453592),
    ("oz", 0.0283495),
];

const AREA: &[(&str, f64)] = &[
    ("m2", 1.0),
    ("km2", 1_000_000.0),
    ("cm2", 0.0001),
    ("mm2", 0.000001),
    ("hectare", 10_000.0),
    ("acre", 4046.86),
];

const VOLUME: &[(&str, f64)] = &[
    ("l", 1.0),
    ("ml", 0.001),
    ("m3", 1000.0),
    ("cm3", 0.001),
    ("gallon", 3.78541),
];

const TIME: &[(&str, f64)] = &[
    ("s", 1.0),
    ("min", 60.0),
    ("hour", 3600.0),
    ("day", 86_400.0),
    ("week", 604_800.0),
    ("month", 2_592_000.0),
    ("year", 31_536_000.0),
];

const TEMPERATURE: &[&str] = &["C", "F", "K"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Length,
    Mass,
    Temperature,
    Area,
    Volume,
    Time,
}

impl UnitCategory {
    pub const ALL: [UnitCategory; 6] = [
        Self::Length,
        Self::Mass,
        Self::Temperature,
        Self::Area,
        Self::Volume,
        Self::Time,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Mass => "mass",
            Self::Temperature => "temperature",
            Self::Area => "area",
            Self::Volume => "volume",
            Self::Time => "time",
        }
    }

    fn table(&self) -> Option<&'static [(&'static str, f64)]> {
        match self {
            Self::Length => Some(LENGTH),
            Self::Mass => Some(MASS),
            Self::Area => Some(AREA),
            Self::Volume => Some(VOLUME),
            Self::Time => Some(TIME),
            Self::Temperature => None,
        }
    }

    /// Unit names accepted in this category
    pub fn units(&self) -> Vec<&'static str> {
        match self.table() {
            Some(table) => table.iter().map(|(name, _)| *name).collect(),
            None => TEMPERATURE.to_vec(),
        }
    }

    /// Canonical spelling of `unit`, matched case-insensitively
    pub fn resolve(&self, unit: &str) -> CalcResult<&'static str> {
        let unit = unit.trim();
        let found = match self {
            Self::Temperature => match unit.to_lowercase().as_str() {
                "c" | "celsius" => Some("C"),
                "f" | "fahrenheit" => Some("F"),
                "k" | "kelvin" => Some("K"),
                _ => None,
            },
            _ => self
                .units()
                .into_iter()
                .find(|name| name.eq_ignore_ascii_case(unit)),
        };
        found.ok_or_else(|| {
            CalcError::Validation(format!(
                "Unknown {} unit '{}'; expected one of: {}",
                self.name(),
                unit,
                self.units().join(", ")
            ))
        })
    }

    fn factor(&self, unit: &str) -> Option<f64> {
        self.table()?
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, factor)| *factor)
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitCategory {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == lower)
            .ok_or_else(|| CalcError::Validation(format!("Unknown unit category: '{}'", s.trim())))
    }
}

fn to_celsius(value: f64, unit: &str) -> f64 {
    match unit {
        "F" => (value - 32.0) * 5.0 / 9.0,
        "K" => value - 273.15,
        _ => value,
    }
}

fn from_celsius(celsius: f64, unit: &str) -> f64 {
    match unit {
        "F" => celsius * 9.0 / 5.0 + 32.0,
        "K" => celsius + 273.15,
        _ => celsius,
    }
}

/// Convert `value` between two units of `category`
pub fn convert(
    value: f64,
    from_unit: &str,
    to_unit: &str,
    category: UnitCategory,
) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::Validation(format!(
            "Value to convert must be a finite number, got {}",
            value
        )));
    }

    let from = category.resolve(from_unit)?;
    let to = category.resolve(to_unit)?;

    if category == UnitCategory::Temperature {
        return Ok(from_celsius(to_celsius(value, from), to));
    }

    match (category.factor(from), category.factor(to)) {
        (Some(from_factor), Some(to_factor)) => Ok(value * from_factor / to_factor),
        _ => Err(CalcError::Validation(format!(
            "No conversion from {} to {}",
            from, to
        ))),
    }
}

/// A conversion as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub category: UnitCategory,
    pub from_unit: String,
    pub to_unit: String,
    pub value: f64,
}

impl ConversionRequest {
    /// Build a request from text input
    pub fn parse(category: &str, value: &str, from_unit: &str, to_unit: &str) -> CalcResult<Self> {
        let value = value.trim().parse::<f64>().map_err(|_| {
            CalcError::Validation(format!("Value must be a number, got '{}'", value.trim()))
        })?;
        Ok(Self {
            category: category.parse()?,
            from_unit: from_unit.to_string(),
            to_unit: to_unit.to_string(),
            value,
        })
    }

    pub fn evaluate(&self) -> CalcResult<f64> {
        convert(self.value, &self.from_unit, &self.to_unit, self.category)
    }
}
