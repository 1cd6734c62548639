//! Factor tables for linear categories
//!
//! A factor says how many of a unit make up one base unit, so Feet is
//! 3.28084 in a table whose base is Meters. Conversion always goes through
//! the base: divide by the source factor, multiply by the target factor.

use serde::Serialize;
use crate::ConversionError;

/// Ordered mapping from unit name to units-per-base-unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorTable {
    label: String,
    entries: Vec<(String, f64)>,
}

impl FactorTable {
    /// Build a table from `(name, factor)` pairs. A repeated name replaces
    /// the earlier factor but keeps its position.
    pub fn new(label: &str, entries: &[(&str, f64)]) -> Self {
        let mut table = FactorTable {
            label: label.to_string(),
            entries: Vec::with_capacity(entries.len()),
        };
        for &(name, factor) in entries {
            match table.entries.iter_mut().find(|(n, _)| n.as_str() == name) {
                Some(slot) => slot.1 = factor,
                None => table.entries.push((name.to_string(), factor)),
            }
        }
        table
    }

    /// Category label used in error messages
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn factor(&self, unit: &str) -> Option<f64> {
        self.entries.iter().find(|(n, _)| n.as_str() == unit).map(|(_, f)| *f)
    }

    /// Unit names in table order
    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first unit with factor exactly 1.0, if any
    pub fn base_unit(&self) -> Option<&str> {
        self.entries.iter().find(|(_, f)| *f == 1.0).map(|(n, _)| n.as_str())
    }

    /// Check every factor is positive and finite
    pub fn validate(&self) -> Result<(), ConversionError> {
        for (unit, factor) in &self.entries {
            check_factor(unit, *factor)?;
        }
        Ok(())
    }

    pub(crate) fn unknown_unit(&self, unit: &str) -> ConversionError {
        ConversionError::UnknownUnit {
            unit: unit.to_string(),
            category: self.label.clone(),
            known: self.units().map(str::to_string).collect(),
        }
    }
}

pub(crate) fn check_factor(unit: &str, factor: f64) -> Result<(), ConversionError> {
    if factor == 0.0 {
        return Err(ConversionError::DivisionByZero { unit: unit.to_string() });
    }
    if !factor.is_finite() || factor < 0.0 {
        return Err(ConversionError::InvalidFactor { unit: unit.to_string(), factor });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FactorTable {
        FactorTable::new("Length", &[("Meters", 1.0), ("Kilometers", 0.001), ("Feet", 3.28084)])
    }

    #[test]
    fn test_lookup_keeps_order() {
        let t = table();
        assert_eq!(t.units().collect::<Vec<_>>(), ["Meters", "Kilometers", "Feet"]);
        assert_eq!(t.factor("Feet"), Some(3.28084));
        assert_eq!(t.factor("feet"), None);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_base_unit_is_convention() {
        assert_eq!(table().base_unit(), Some("Meters"));
        let no_base = FactorTable::new("Length", &[("Feet", 3.28084), ("Inches", 39.3701)]);
        assert_eq!(no_base.base_unit(), None);
        assert!(no_base.validate().is_ok());
    }

    #[test]
    fn test_repeated_name_replaces_in_place() {
        let t = FactorTable::new("Weight", &[("Grams", 1.0), ("Pounds", 2.0), ("Grams", 1000.0)]);
        assert_eq!(t.units().collect::<Vec<_>>(), ["Grams", "Pounds"]);
        assert_eq!(t.factor("Grams"), Some(1000.0));
    }

    #[test]
    fn test_validate_rejects_bad_factors() {
        let zero = FactorTable::new("Length", &[("Meters", 1.0), ("Nothing", 0.0)]);
        assert!(matches!(zero.validate(), Err(ConversionError::DivisionByZero { .. })));

        let negative = FactorTable::new("Length", &[("Meters", -1.0)]);
        assert!(matches!(negative.validate(), Err(ConversionError::InvalidFactor { .. })));

        let infinite = FactorTable::new("Length", &[("Meters", f64::INFINITY)]);
        assert!(matches!(infinite.validate(), Err(ConversionError::InvalidFactor { .. })));
    }
}
