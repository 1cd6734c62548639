//! Built-in unit catalog

use std::sync::LazyLock;
use crate::search::filter_units;
use crate::{FactorTable, TemperatureUnit, UnitCategory};

/// Global unit catalog, built on first use and never mutated
pub static CATALOG: LazyLock<UnitCatalog> = LazyLock::new(UnitCatalog::new);

/// Category to unit mapping, with factor tables for the linear categories
pub struct UnitCatalog {
    length: FactorTable,
    weight: FactorTable,
}

impl UnitCatalog {
    fn new() -> Self {
        UnitCatalog {
            length: length_units(),
            weight: weight_units(),
        }
    }

    pub fn categories(&self) -> &'static [UnitCategory] {
        &UnitCategory::ALL
    }

    /// Factor table for a linear category; `None` for Temperature
    pub fn factors(&self, category: UnitCategory) -> Option<&FactorTable> {
        match category {
            UnitCategory::Length => Some(&self.length),
            UnitCategory::Weight => Some(&self.weight),
            UnitCategory::Temperature => None,
        }
    }

    /// Unit names of a category in display order
    pub fn units(&self, category: UnitCategory) -> Vec<&str> {
        match self.factors(category) {
            Some(table) => table.units().collect(),
            None => TemperatureUnit::ALL.iter().map(|u| u.name()).collect(),
        }
    }

    /// How a unit is shown in listings: temperatures carry their symbol,
    /// as in `Celsius (C)`; everything else is the bare name
    pub fn label(&self, category: UnitCategory, unit: &str) -> String {
        match (category, TemperatureUnit::from_name(unit)) {
            (UnitCategory::Temperature, Some(t)) => format!("{} ({})", t.name(), t.symbol()),
            _ => unit.to_string(),
        }
    }

    /// Units of a category whose name contains `term`, ignoring case
    pub fn search(&self, category: UnitCategory, term: &str) -> Vec<&str> {
        filter_units(self.units(category), term)
    }
}

fn length_units() -> FactorTable {
    // Base unit: Meters
    FactorTable::new("Length", &[
        ("Meters", 1.0),
        ("Kilometers", 0.001),
        ("Centimeters", 100.0),
        ("Millimeters", 1000.0),
        ("Miles", 0.000621371),
        ("Yards", 1.09361),
        ("Feet", 3.28084),
        ("Inches", 39.3701),
    ])
}

fn weight_units() -> FactorTable {
    // Base unit: Kilograms
    FactorTable::new("Weight", &[
        ("Kilograms", 1.0),
        ("Grams", 1000.0),
        ("Milligrams", 1_000_000.0),
        ("Pounds", 2.20462),
        ("Ounces", 35.274),
        ("Metric Tons", 0.001),
    ])
}
