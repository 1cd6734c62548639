//! Evaluation Context

use measura_core::DISPLAY_SIGFIGS;

/// Evaluation context passed to plugins
#[derive(Debug, Clone)]
pub struct EvalContext {
    /// Significant digits for any text a plugin renders
    pub sigfigs: u32,
}

impl EvalContext {
    pub fn new() -> Self {
        Self { sigfigs: DISPLAY_SIGFIGS }
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}
