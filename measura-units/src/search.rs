//! Unit name filtering

/// Keep the units whose name contains `term`, ignoring case.
///
/// Surrounding whitespace in `term` is ignored and an empty term keeps
/// everything. Input order is preserved.
pub fn filter_units<'a, I>(units: I, term: &str) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = term.trim().to_lowercase();
    units
        .into_iter()
        .filter(|unit| needle.is_empty() || unit.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LENGTH: [&str; 8] = [
        "Meters", "Kilometers", "Centimeters", "Millimeters",
        "Miles", "Yards", "Feet", "Inches",
    ];

    #[test]
    fn test_substring_match() {
        assert_eq!(
            filter_units(LENGTH, "met"),
            ["Meters", "Kilometers", "Centimeters", "Millimeters"]
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(filter_units(LENGTH, "MILE"), ["Miles"]);
        assert_eq!(filter_units(LENGTH, "  feet "), ["Feet"]);
    }

    #[test]
    fn test_empty_term_keeps_all() {
        assert_eq!(filter_units(LENGTH, ""), LENGTH);
        assert_eq!(filter_units(LENGTH, "   ").len(), 8);
    }

    #[test]
    fn test_no_match() {
        assert!(filter_units(LENGTH, "xyz").is_empty());
    }
}
