//! Conversion errors

use measura_core::MeasuraError;
use thiserror::Error;

/// Errors that can occur during unit conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Unit name not present in the category being converted
    #[error("unknown {category} unit: {unit}")]
    UnknownUnit {
        unit: String,
        category: String,
        known: Vec<String>,
    },

    /// Category name outside Length, Weight, Temperature
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// Source unit has a zero factor
    #[error("division by zero: factor for {unit} is 0")]
    DivisionByZero { unit: String },

    /// Factor is negative or not finite
    #[error("invalid factor for {unit}: {factor}")]
    InvalidFactor { unit: String, factor: f64 },
}

impl From<ConversionError> for MeasuraError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnknownUnit { unit, category, known } => {
                MeasuraError::unknown_unit(&unit, &category)
                    .with_suggestion(format!("Valid {} units: {}", category, known.join(", ")))
            }
            ConversionError::UnknownCategory(name) => MeasuraError::unknown_category(&name),
            ConversionError::DivisionByZero { unit } => MeasuraError::div_zero(&unit),
            ConversionError::InvalidFactor { unit, factor } => MeasuraError::invalid_factor(&unit, factor),
        }
    }
}
