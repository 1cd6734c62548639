//! Measura Core - Fundamental types
//!
//! This crate provides the core types used throughout Measura:
//! - `Value`: Runtime values (numbers, text, objects, errors)
//! - `MeasuraError`: Structured errors for presentation surfaces
//! - `format_sigfigs`: Fixed-width result rendering

mod error;
mod format;
mod value;

pub use error::{codes, MeasuraError, Severity};
pub use format::format_sigfigs;
pub use value::Value;

/// Significant digits used when a number is shown to the user
pub const DISPLAY_SIGFIGS: u32 = 4;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{format_sigfigs, MeasuraError, Severity, Value, DISPLAY_SIGFIGS};
}
