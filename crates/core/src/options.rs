//! Configuration for test marking.
//!
//! Marking is meant for test environments only. [`MarkerOptions::from_env`]
//! turns it on when `TESTMARK_ENV=test`; outside of that, inserts pass
//! through unstamped and cleanups are no-ops.

use crate::metadata::DEFAULT_FIELD;

/// Environment variable that must equal `"test"` for [`MarkerOptions::from_env`] to enable marking
pub const ENV_VAR: &str = "TESTMARK_ENV";

/// Environment variable overriding the metadata field name
pub const FIELD_VAR: &str = "TESTMARK_FIELD";

/// Options for a test marker.
///
/// ```ignore
/// use testmark_core::MarkerOptions;
///
/// let opts = MarkerOptions::new().field_name("_fixture");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerOptions {
    /// Stamp and track documents; when false everything passes through
    pub enabled: bool,
    /// Name of the metadata sub-object written onto documents
    pub field_name: String,
}

impl MarkerOptions {
    /// Default options: enabled, field `__test`
    pub fn new() -> Self {
        Self::default()
    }

    /// Options derived from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Options derived from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup(ENV_VAR).as_deref() == Some("test");
        let field_name = lookup(FIELD_VAR)
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_FIELD.to_string());
        Self {
            enabled,
            field_name,
        }
    }

    /// Turn marking on or off
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the metadata field name
    ///
    /// An empty name is ignored, as it is for `TESTMARK_FIELD`.
    pub fn field_name(mut self, field_name: impl Into<String>) -> Self {
        let field_name = field_name.into();
        if !field_name.is_empty() {
            self.field_name = field_name;
        }
        self
    }
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            field_name: DEFAULT_FIELD.to_string(),
        }
    }
}
