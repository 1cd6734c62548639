//! Structured errors for conversion surfaces
//!
//! Errors never crash the process. They are values that carry a
//! machine-readable code, a message for the user and, where one exists,
//! a hint about what to try next.

use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const INVALID_FACTOR: &str = "INVALID_FACTOR";
    pub const NO_MATCH: &str = "NO_MATCH";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Input was usable but the result is degraded
    Warning,
    /// This conversion failed; the caller may retry with other input
    Error,
    /// The surface itself is broken
    Fatal,
}

/// Structured error returned to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuraError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Severity level
    pub severity: Severity,
}

impl MeasuraError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn unknown_unit(unit: &str, category: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown {} unit: {}", category.to_lowercase(), unit))
    }

    pub fn unknown_category(name: &str) -> Self {
        Self::new(codes::UNKNOWN_CATEGORY, format!("Unknown category: {}", name))
            .with_suggestion("Use list_categories() to see supported categories")
    }

    pub fn div_zero(unit: &str) -> Self {
        Self::new(codes::DIV_ZERO, format!("Division by zero: factor for '{}' is 0", unit))
            .with_suggestion("Factors must be positive")
    }

    pub fn invalid_factor(unit: &str, factor: f64) -> Self {
        Self::new(codes::INVALID_FACTOR, format!("Invalid factor for '{}': {}", unit, factor))
            .with_suggestion("Factors must be positive and finite")
    }

    pub fn no_match(term: &str) -> Self {
        Self::new(codes::NO_MATCH, "No units found matching your search.")
            .with_suggestion(format!("Clear or shorten the search term '{}'", term))
            .with_severity(Severity::Warning)
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
            .with_suggestion("Use help() to list available functions")
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got))
            .with_suggestion(format!("Use help('{}') for usage", func))
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got))
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, format!("Domain error: {}", details.into()))
    }

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
            .with_suggestion("Enter a plain decimal number such as 12.5 or -40")
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for MeasuraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for MeasuraError {}
