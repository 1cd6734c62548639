//! Temperature conversion
//!
//! Temperatures are affine, not proportional, so they have no factor table.
//! Every conversion is routed through Celsius: the source is normalized to
//! Celsius, then Celsius is taken to the target. Fahrenheit to Kelvin is
//! therefore two affine steps, never a direct formula.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::ConversionError;

/// Offset between Kelvin and Celsius
const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    /// All units in display order
    pub const ALL: [TemperatureUnit; 3] = [
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "Celsius",
            TemperatureUnit::Fahrenheit => "Fahrenheit",
            TemperatureUnit::Kelvin => "Kelvin",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
            TemperatureUnit::Kelvin => "K",
        }
    }

    /// Look up by full name ("Kelvin") or symbol ("K")
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.name() == name || u.symbol() == name)
    }

    fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Kelvin => value - KELVIN_OFFSET,
        }
    }

    fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Kelvin => celsius + KELVIN_OFFSET,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TemperatureUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ConversionError::UnknownUnit {
            unit: s.to_string(),
            category: "Temperature".to_string(),
            known: Self::ALL.iter().map(|u| u.name().to_string()).collect(),
        })
    }
}

/// Convert a temperature between two units.
///
/// Identical units return `value` untouched. Values below absolute zero
/// are converted like any other.
pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    if from == to {
        return value;
    }
    to.from_celsius(from.to_celsius(value))
}

/// Name-based form of [`convert_temperature`]; the source unit is checked first.
pub fn convert_temperature_named(value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
    let from: TemperatureUnit = from.parse()?;
    let to: TemperatureUnit = to.parse()?;
    Ok(convert_temperature(value, from, to))
}
