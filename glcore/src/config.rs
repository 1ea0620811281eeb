use crate::error::GlResult;
use serde::{Deserialize, Serialize};

/// Behavioral switches of a [`Context`](crate::Context).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Skip bind calls when the cache says the object is already bound.
    ///
    /// When disabled, every bind is issued to the driver, which makes the wrappers immune to
    /// binding changes made by foreign code.
    pub cache_bindings: bool,
    /// Restore the previous binding at the end of every operation that had to bind something.
    ///
    /// Off by default: the object is left bound, since most call sequences bind again before use.
    pub strict_unbind: bool,
    /// Poll the error register after each native command and log what comes out.
    pub check_errors: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        ContextConfig {
            cache_bindings: true,
            strict_unbind: false,
            check_errors: cfg!(debug_assertions),
        }
    }
}

impl ContextConfig {
    /// Parses a configuration from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> GlResult<ContextConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn cache_bindings(mut self, enabled: bool) -> Self {
        self.cache_bindings = enabled;
        self
    }

    pub fn strict_unbind(mut self, enabled: bool) -> Self {
        self.strict_unbind = enabled;
        self
    }

    pub fn check_errors(mut self, enabled: bool) -> Self {
        self.check_errors = enabled;
        self
    }
}
