//! Linear conversion and category dispatch

use std::fmt;
use serde::{Serialize, Deserialize};
use measura_core::{format_sigfigs, DISPLAY_SIGFIGS};
use crate::factors::check_factor;
use crate::temperature::convert_temperature_named;
use crate::units::CATALOG;
use crate::{ConversionError, FactorTable, UnitCategory};

/// Convert `value` between two units of the same factor table.
///
/// The value is first taken to the base unit (`value / factors[from]`) and
/// then to the target (`base * factors[to]`). The source unit is looked up
/// before the target, so an unknown source is the one reported. Converting a
/// unit to itself returns `value` unchanged once both factors check out.
pub fn convert_units(
    value: f64,
    from_unit: &str,
    to_unit: &str,
    factors: &FactorTable,
) -> Result<f64, ConversionError> {
    let from_factor = factors.factor(from_unit).ok_or_else(|| factors.unknown_unit(from_unit))?;
    let to_factor = factors.factor(to_unit).ok_or_else(|| factors.unknown_unit(to_unit))?;
    check_factor(from_unit, from_factor)?;
    check_factor(to_unit, to_factor)?;

    if from_unit == to_unit {
        return Ok(value);
    }

    let base = value / from_factor;
    Ok(base * to_factor)
}

/// Convert within a category: Temperature goes through the affine
/// converter, every other category through its factor table.
pub fn convert(category: UnitCategory, value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
    match CATALOG.factors(category) {
        Some(table) => convert_units(value, from, to, table),
        None => convert_temperature_named(value, from, to),
    }
}

/// A conversion request as collected by a presentation surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub category: UnitCategory,
    pub value: f64,
    pub from: String,
    pub to: String,
}

impl Conversion {
    pub fn new(category: UnitCategory, value: f64, from: impl Into<String>, to: impl Into<String>) -> Self {
        Conversion {
            category,
            value,
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn run(&self) -> Result<ConversionOutcome, ConversionError> {
        let result = convert(self.category, self.value, &self.from, &self.to)?;
        Ok(ConversionOutcome {
            request: self.clone(),
            result,
        })
    }
}

/// A completed conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOutcome {
    pub request: Conversion,
    pub result: f64,
}

impl ConversionOutcome {
    /// `"1 Meters = 3.281 Feet"`
    pub fn summary(&self) -> String {
        self.summary_with(DISPLAY_SIGFIGS)
    }

    pub fn summary_with(&self, sigfigs: u32) -> String {
        format!(
            "{} {} = {} {}",
            format_sigfigs(self.request.value, sigfigs),
            self.request.from,
            format_sigfigs(self.result, sigfigs),
            self.request.to,
        )
    }
}

impl fmt::Display for ConversionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length() -> &'static FactorTable {
        CATALOG.factors(UnitCategory::Length).expect("length table")
    }

    fn weight() -> &'static FactorTable {
        CATALOG.factors(UnitCategory::Weight).expect("weight table")
    }

    #[test]
    fn test_meters_to_feet() {
        let feet = convert_units(1.0, "Meters", "Feet", length()).unwrap();
        assert!((feet - 3.28084).abs() < 1e-12);
    }

    #[test]
    fn test_grams_to_kilograms() {
        assert_eq!(convert_units(1000.0, "Grams", "Kilograms", weight()), Ok(1.0));
    }

    #[test]
    fn test_between_non_base_units() {
        // 1 mile in feet, through meters
        let feet = convert_units(1.0, "Miles", "Feet", length()).unwrap();
        assert!((feet - 5280.0).abs() < 0.01, "got {}", feet);
    }

    #[test]
    fn test_unknown_source_reported_first() {
        let err = convert_units(5.0, "Parsecs", "Furlongs", length()).unwrap_err();
        assert!(matches!(err, ConversionError::UnknownUnit { ref unit, .. } if unit == "Parsecs"));

        let err = convert_units(5.0, "Meters", "Furlongs", length()).unwrap_err();
        assert!(matches!(err, ConversionError::UnknownUnit { ref unit, .. } if unit == "Furlongs"));
    }

    #[test]
    fn test_unknown_unit_names_category() {
        match convert_units(5.0, "Parsecs", "Meters", length()) {
            Err(ConversionError::UnknownUnit { category, known, .. }) => {
                assert_eq!(category, "Length");
                assert_eq!(known.len(), 8);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_zero_source_factor() {
        let table = FactorTable::new("Length", &[("Meters", 1.0), ("Broken", 0.0)]);
        assert_eq!(
            convert_units(1.0, "Broken", "Meters", &table),
            Err(ConversionError::DivisionByZero { unit: "Broken".to_string() })
        );
    }

    #[test]
    fn test_negative_factor() {
        let table = FactorTable::new("Length", &[("Meters", 1.0), ("Backwards", -2.0)]);
        assert!(matches!(
            convert_units(1.0, "Meters", "Backwards", &table),
            Err(ConversionError::InvalidFactor { .. })
        ));
    }

    #[test]
    fn test_same_unit_is_exact() {
        // 790.8127447431682 / 0.001 * 0.001 is one ulp off
        let v = 790.8127447431682;
        assert_eq!(convert_units(v, "Kilometers", "Kilometers", length()), Ok(v));
        assert_eq!(convert_units(v, "Miles", "Miles", length()), Ok(v));
    }

    #[test]
    fn test_same_unit_still_checks_factor() {
        let table = FactorTable::new("Length", &[("Meters", 1.0), ("Broken", 0.0)]);
        assert!(matches!(
            convert_units(1.0, "Broken", "Broken", &table),
            Err(ConversionError::DivisionByZero { .. })
        ));
        assert!(matches!(
            convert_units(1.0, "Parsecs", "Parsecs", length()),
            Err(ConversionError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn test_table_without_unit_one_factor() {
        let table = FactorTable::new("Length", &[("Feet", 3.0), ("Inches", 36.0)]);
        assert_eq!(table.base_unit(), None);
        assert_eq!(convert_units(72.0, "Inches", "Feet", &table), Ok(6.0));
    }

    #[test]
    fn test_dispatch_by_category() {
        assert_eq!(convert(UnitCategory::Temperature, 100.0, "Celsius", "Fahrenheit"), Ok(212.0));
        assert_eq!(convert(UnitCategory::Weight, 1000.0, "Grams", "Kilograms"), Ok(1.0));
        assert!(convert(UnitCategory::Length, 1.0, "Grams", "Meters").is_err());
        assert!(convert(UnitCategory::Temperature, 1.0, "Meters", "Kelvin").is_err());
    }

    #[test]
    fn test_summary_line() {
        let outcome = Conversion::new(UnitCategory::Length, 1.0, "Meters", "Feet").run().unwrap();
        assert_eq!(outcome.summary(), "1 Meters = 3.281 Feet");

        let outcome = Conversion::new(UnitCategory::Temperature, 0.0, "Celsius", "Kelvin").run().unwrap();
        assert_eq!(outcome.to_string(), "0 Celsius = 273.1 Kelvin");

        let outcome = Conversion::new(UnitCategory::Weight, 5.0, "Metric Tons", "Milligrams").run().unwrap();
        assert_eq!(outcome.summary(), "5 Metric Tons = 5e+09 Milligrams");
    }
}
