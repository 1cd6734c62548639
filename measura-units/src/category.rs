//! Unit categories

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::ConversionError;

/// The closed set of quantities the converter knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitCategory {
    Length,
    Weight,
    Temperature,
}

impl UnitCategory {
    /// All categories in display order
    pub const ALL: [UnitCategory; 3] = [
        UnitCategory::Length,
        UnitCategory::Weight,
        UnitCategory::Temperature,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            UnitCategory::Length => "Length",
            UnitCategory::Weight => "Weight",
            UnitCategory::Temperature => "Temperature",
        }
    }

    /// Look up a category by name, ignoring case and surrounding whitespace
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for UnitCategory {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ConversionError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_in_display_order() {
        let names: Vec<&str> = UnitCategory::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["Length", "Weight", "Temperature"]);
    }

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!("weight".parse::<UnitCategory>(), Ok(UnitCategory::Weight));
        assert_eq!(" TEMPERATURE ".parse::<UnitCategory>(), Ok(UnitCategory::Temperature));
        assert_eq!(
            "Volume".parse::<UnitCategory>(),
            Err(ConversionError::UnknownCategory("Volume".to_string()))
        );
    }
}
