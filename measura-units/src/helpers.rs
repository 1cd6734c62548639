//! Argument extraction shared by the unit functions

use measura_core::{MeasuraError, Value};
use crate::UnitCategory;

/// Extract a Number from a Value. Numeric text ("12.5") is accepted since
/// form fields arrive as strings.
pub fn extract_number(value: &Value, func: &str, arg: &str) -> Result<f64, MeasuraError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Text(_) => match value.to_number() {
            Value::Number(n) => Ok(n),
            Value::Error(e) => Err(e),
            other => Err(MeasuraError::arg_type(func, arg, "Number", other.type_name())),
        },
        Value::Error(e) => Err(e.clone()),
        other => Err(MeasuraError::arg_type(func, arg, "Number", other.type_name())),
    }
}

/// Extract a Text string from a Value
pub fn extract_text<'a>(value: &'a Value, func: &str, arg: &str) -> Result<&'a str, MeasuraError> {
    match value {
        Value::Text(s) => Ok(s),
        Value::Error(e) => Err(e.clone()),
        other => Err(MeasuraError::arg_type(func, arg, "Text", other.type_name())),
    }
}

/// Extract optional Text string (missing or null gives None)
pub fn extract_optional_text(args: &[Value], index: usize) -> Option<&str> {
    args.get(index).and_then(|v| v.as_text())
}

pub fn extract_category(value: &Value, func: &str) -> Result<UnitCategory, MeasuraError> {
    let name = extract_text(value, func, "category")?;
    name.parse::<UnitCategory>().map_err(MeasuraError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use measura_core::codes;

    #[test]
    fn test_extract_number_accepts_numeric_text() {
        assert_eq!(extract_number(&Value::Number(2.0), "f", "value"), Ok(2.0));
        assert_eq!(extract_number(&Value::from("-40"), "f", "value"), Ok(-40.0));
        assert_eq!(
            extract_number(&Value::from("abc"), "f", "value").map_err(|e| e.code),
            Err(codes::PARSE_ERROR.to_string())
        );
        assert_eq!(
            extract_number(&Value::Bool(true), "f", "value").map_err(|e| e.code),
            Err(codes::ARG_TYPE.to_string())
        );
    }

    #[test]
    fn test_extract_category() {
        assert_eq!(extract_category(&Value::from("length"), "f"), Ok(UnitCategory::Length));
        assert_eq!(
            extract_category(&Value::from("Volume"), "f").map_err(|e| e.code),
            Err(codes::UNKNOWN_CATEGORY.to_string())
        );
    }

    #[test]
    fn test_optional_text() {
        let args = [Value::from("Length"), Value::Null];
        assert_eq!(extract_optional_text(&args, 0), Some("Length"));
        assert_eq!(extract_optional_text(&args, 1), None);
        assert_eq!(extract_optional_text(&args, 2), None);
    }
}
