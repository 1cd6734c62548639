//! Measura Units - Length, Weight and Temperature conversion
//!
//! Length and Weight are linear: each unit carries a factor giving how
//! many of it make one base unit (Meters, Kilograms) and a conversion
//! divides by the source factor and multiplies by the target factor.
//! Temperature is affine and always passes through Celsius.
//!
//! Categories:
//! - Length (Meters, Kilometers, Centimeters, Millimeters, Miles, Yards, Feet, Inches)
//! - Weight (Kilograms, Grams, Milligrams, Pounds, Ounces, Metric Tons)
//! - Temperature (Celsius, Fahrenheit, Kelvin)

mod category;
mod convert;
mod error;
mod factors;
mod functions;
mod helpers;
mod search;
mod temperature;
mod units;

pub use category::UnitCategory;
pub use convert::{convert, convert_units, Conversion, ConversionOutcome};
pub use error::ConversionError;
pub use factors::FactorTable;
pub use search::filter_units;
pub use temperature::{convert_temperature, convert_temperature_named, TemperatureUnit};
pub use units::{UnitCatalog, CATALOG};

use measura_plugin::PluginRegistry;

/// Load unit functions into registry
pub fn load_units_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Conversion (3 functions)
        .with_function(functions::ConvertUnits)
        .with_function(functions::ConvertTemperature)
        .with_function(functions::Convert)

        // Catalog (2 functions)
        .with_function(functions::ListCategories)
        .with_function(functions::ListUnits)
}

/// Registry with every unit function loaded
pub fn standard_registry() -> PluginRegistry {
    load_units_library(PluginRegistry::new())
}
