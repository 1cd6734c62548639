//! Measura Plugin System
//!
//! Functions are pure computations registered by name. Conversion
//! libraries load themselves into a `PluginRegistry`; presentation
//! surfaces call into it by name with `Value` arguments.

mod traits;
mod registry;
mod context;

pub use traits::{FunctionPlugin, FunctionMeta, ArgMeta};
pub use registry::PluginRegistry;
pub use context::EvalContext;

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{FunctionPlugin, FunctionMeta, ArgMeta, PluginRegistry, EvalContext};
    pub use measura_core::prelude::*;
}
