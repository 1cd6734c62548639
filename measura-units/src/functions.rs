//! Unit conversion functions for the plugin registry

use std::collections::HashMap;
use measura_plugin::prelude::*;
use crate::helpers::{extract_category, extract_number, extract_optional_text, extract_text};
use crate::units::CATALOG;
use crate::{convert_temperature_named, convert_units, Conversion, UnitCategory};

// ============ convert_units ============

pub struct ConvertUnits;

static CONVERT_UNITS_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("from_unit", "Text", "Source unit (e.g., \"Meters\")"),
    ArgMeta::required("to_unit", "Text", "Target unit (e.g., \"Feet\")"),
    ArgMeta::required("category", "Text", "Linear category: \"Length\" or \"Weight\""),
];

static CONVERT_UNITS_EXAMPLES: [&str; 2] = [
    "convert_units(1, \"Meters\", \"Feet\", \"Length\") → 3.28084",
    "convert_units(1000, \"Grams\", \"Kilograms\", \"Weight\") → 1",
];

static CONVERT_UNITS_RELATED: [&str; 2] = ["convert", "list_units"];

impl FunctionPlugin for ConvertUnits {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert_units",
            description: "Convert a value between two units of a linear category via its base unit",
            usage: "convert_units(value, from_unit, to_unit, category)",
            args: &CONVERT_UNITS_ARGS,
            returns: "Number",
            examples: &CONVERT_UNITS_EXAMPLES,
            category: "units",
            related: &CONVERT_UNITS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() < 4 {
            return Value::Error(MeasuraError::arg_count("convert_units", 4, args.len()));
        }

        let value = match extract_number(&args[0], "convert_units", "value") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let from = match extract_text(&args[1], "convert_units", "from_unit") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };
        let to = match extract_text(&args[2], "convert_units", "to_unit") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };
        let category = match extract_category(&args[3], "convert_units") {
            Ok(c) => c,
            Err(e) => return Value::Error(e),
        };

        let factors = match CATALOG.factors(category) {
            Some(t) => t,
            None => return Value::Error(MeasuraError::domain_error(format!(
                "convert_units() needs a linear category, got {}. Use convert_temperature()",
                category
            ))),
        };

        match convert_units(value, from, to, factors) {
            Ok(result) => Value::Number(result),
            Err(e) => Value::Error(e.into()),
        }
    }
}

// ============ convert_temperature ============

pub struct ConvertTemperature;

static CONVERT_TEMPERATURE_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("value", "Number", "Temperature to convert"),
    ArgMeta::required("from_unit", "Text", "\"Celsius\", \"Fahrenheit\" or \"Kelvin\" (or C, F, K)"),
    ArgMeta::required("to_unit", "Text", "\"Celsius\", \"Fahrenheit\" or \"Kelvin\" (or C, F, K)"),
];

static CONVERT_TEMPERATURE_EXAMPLES: [&str; 3] = [
    "convert_temperature(100, \"Celsius\", \"Fahrenheit\") → 212",
    "convert_temperature(32, \"Fahrenheit\", \"Celsius\") → 0",
    "convert_temperature(0, \"Celsius\", \"Kelvin\") → 273.15",
];

static CONVERT_TEMPERATURE_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for ConvertTemperature {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert_temperature",
            description: "Convert a temperature, routing through Celsius",
            usage: "convert_temperature(value, from_unit, to_unit)",
            args: &CONVERT_TEMPERATURE_ARGS,
            returns: "Number",
            examples: &CONVERT_TEMPERATURE_EXAMPLES,
            category: "units",
            related: &CONVERT_TEMPERATURE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() < 3 {
            return Value::Error(MeasuraError::arg_count("convert_temperature", 3, args.len()));
        }

        let value = match extract_number(&args[0], "convert_temperature", "value") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let from = match extract_text(&args[1], "convert_temperature", "from_unit") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };
        let to = match extract_text(&args[2], "convert_temperature", "to_unit") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };

        match convert_temperature_named(value, from, to) {
            Ok(result) => Value::Number(result),
            Err(e) => Value::Error(e.into()),
        }
    }
}

// ============ convert ============

pub struct Convert;

static CONVERT_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("category", "Text", "\"Length\", \"Weight\" or \"Temperature\""),
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("from_unit", "Text", "Source unit"),
    ArgMeta::required("to_unit", "Text", "Target unit"),
];

static CONVERT_EXAMPLES: [&str; 2] = [
    "convert(\"Length\", 1, \"Meters\", \"Feet\") → {result: 3.28084, text: \"1 Meters = 3.281 Feet\"}",
    "convert(\"Temperature\", 100, \"Celsius\", \"Fahrenheit\") → {result: 212, text: \"100 Celsius = 212 Fahrenheit\"}",
];

static CONVERT_RELATED: [&str; 3] = ["convert_units", "convert_temperature", "list_units"];

impl FunctionPlugin for Convert {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert",
            description: "Convert a value within a category and render the result line",
            usage: "convert(category, value, from_unit, to_unit)",
            args: &CONVERT_ARGS,
            returns: "Object {category, value, from, to, result, text}",
            examples: &CONVERT_EXAMPLES,
            category: "units",
            related: &CONVERT_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.len() < 4 {
            return Value::Error(MeasuraError::arg_count("convert", 4, args.len()));
        }

        let category = match extract_category(&args[0], "convert") {
            Ok(c) => c,
            Err(e) => return Value::Error(e),
        };
        let value = match extract_number(&args[1], "convert", "value") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let from = match extract_text(&args[2], "convert", "from_unit") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };
        let to = match extract_text(&args[3], "convert", "to_unit") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };

        let outcome = match Conversion::new(category, value, from, to).run() {
            Ok(o) => o,
            Err(e) => return Value::Error(e.into()),
        };

        let mut obj = HashMap::new();
        obj.insert("category".to_string(), Value::Text(category.name().to_string()));
        obj.insert("value".to_string(), Value::Number(value));
        obj.insert("from".to_string(), Value::Text(from.to_string()));
        obj.insert("to".to_string(), Value::Text(to.to_string()));
        obj.insert("result".to_string(), Value::Number(outcome.result));
        obj.insert("text".to_string(), Value::Text(outcome.summary_with(ctx.sigfigs)));
        Value::Object(obj)
    }
}

// ============ list_categories ============

pub struct ListCategories;

static LIST_CATEGORIES_EXAMPLES: [&str; 1] = [
    "list_categories() → [\"Length\", \"Weight\", \"Temperature\"]",
];

static LIST_CATEGORIES_RELATED: [&str; 1] = ["list_units"];

impl FunctionPlugin for ListCategories {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "list_categories",
            description: "List the supported unit categories",
            usage: "list_categories()",
            args: &[],
            returns: "List",
            examples: &LIST_CATEGORIES_EXAMPLES,
            category: "units",
            related: &LIST_CATEGORIES_RELATED,
        }
    }

    fn call(&self, _args: &[Value], _ctx: &EvalContext) -> Value {
        Value::List(
            CATALOG.categories().iter()
                .map(|c| Value::Text(c.name().to_string()))
                .collect()
        )
    }
}

// ============ list_units ============

pub struct ListUnits;

static LIST_UNITS_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("category", "Text", "\"Length\", \"Weight\" or \"Temperature\""),
    ArgMeta::optional("search", "Text", "Keep only units containing this text (case-insensitive)", ""),
];

static LIST_UNITS_EXAMPLES: [&str; 2] = [
    "list_units(\"Temperature\") → [\"Celsius\", \"Fahrenheit\", \"Kelvin\"]",
    "list_units(\"Length\", \"met\") → [\"Meters\", \"Kilometers\", \"Centimeters\", \"Millimeters\"]",
];

static LIST_UNITS_RELATED: [&str; 2] = ["list_categories", "convert"];

impl FunctionPlugin for ListUnits {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "list_units",
            description: "List the units of a category, optionally filtered by a search term",
            usage: "list_units(category, search?)",
            args: &LIST_UNITS_ARGS,
            returns: "List",
            examples: &LIST_UNITS_EXAMPLES,
            category: "units",
            related: &LIST_UNITS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.is_empty() {
            return Value::Error(MeasuraError::arg_count("list_units", 1, 0));
        }

        let category: UnitCategory = match extract_category(&args[0], "list_units") {
            Ok(c) => c,
            Err(e) => return Value::Error(e),
        };
        let term = extract_optional_text(args, 1).unwrap_or("");

        let units = CATALOG.search(category, term);
        if units.is_empty() {
            return Value::Error(MeasuraError::no_match(term));
        }

        Value::List(units.into_iter().map(|u| Value::Text(u.to_string())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call<F: FunctionPlugin>(f: F, args: &[Value]) -> Value {
        f.call(args, &EvalContext::new())
    }

    fn error_code(v: &Value) -> Option<&str> {
        v.as_error().map(|e| e.code.as_str())
    }

    #[test]
    fn test_convert_units() {
        let v = call(ConvertUnits, &["1000".into(), "Grams".into(), "Kilograms".into(), "Weight".into()]);
        assert_eq!(v, Value::Number(1.0));
    }

    #[test]
    fn test_convert_units_rejects_temperature() {
        let v = call(ConvertUnits, &[0.0.into(), "Celsius".into(), "Kelvin".into(), "Temperature".into()]);
        assert_eq!(error_code(&v), Some(codes::DOMAIN_ERROR));
    }

    #[test]
    fn test_convert_units_unknown_unit() {
        let v = call(ConvertUnits, &[5.0.into(), "Parsecs".into(), "Meters".into(), "Length".into()]);
        assert_eq!(error_code(&v), Some(codes::UNKNOWN_UNIT));
    }

    #[test]
    fn test_convert_temperature() {
        let v = call(ConvertTemperature, &[32.0.into(), "Fahrenheit".into(), "Celsius".into()]);
        assert_eq!(v, Value::Number(0.0));
        let v = call(ConvertTemperature, &[32.0.into(), "Fahrenheit".into(), "Rankine".into()]);
        assert_eq!(error_code(&v), Some(codes::UNKNOWN_UNIT));
    }

    #[test]
    fn test_convert_object() {
        let v = call(Convert, &["Length".into(), 1.0.into(), "Meters".into(), "Feet".into()]);
        assert_eq!(v.get("text"), Value::Text("1 Meters = 3.281 Feet".to_string()));
        assert_eq!(v.get("category"), Value::Text("Length".to_string()));
        let result = v.get("result").as_number().unwrap_or(0.0);
        assert!((result - 3.28084).abs() < 1e-12);
    }

    #[test]
    fn test_convert_arg_errors() {
        let v = call(Convert, &["Length".into(), 1.0.into()]);
        assert_eq!(error_code(&v), Some(codes::ARG_COUNT));
        let v = call(Convert, &["Volume".into(), 1.0.into(), "Liters".into(), "Cups".into()]);
        assert_eq!(error_code(&v), Some(codes::UNKNOWN_CATEGORY));
        let v = call(Convert, &["Length".into(), Value::Null, "Meters".into(), "Feet".into()]);
        assert_eq!(error_code(&v), Some(codes::ARG_TYPE));
    }

    #[test]
    fn test_list_categories() {
        let v = call(ListCategories, &[]);
        assert_eq!(v.to_string(), "[Length, Weight, Temperature]");
    }

    #[test]
    fn test_list_units_with_search() {
        let v = call(ListUnits, &["Length".into(), "MILE".into()]);
        assert_eq!(v, Value::List(vec![Value::Text("Miles".to_string())]));

        let v = call(ListUnits, &["Weight".into()]);
        assert_eq!(v.as_list().map(|l| l.len()), Some(6));
    }

    #[test]
    fn test_list_units_no_match() {
        let v = call(ListUnits, &["Temperature".into(), "xyz".into()]);
        assert_eq!(error_code(&v), Some(codes::NO_MATCH));
    }
}
