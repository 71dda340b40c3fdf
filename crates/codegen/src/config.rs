//! Generator configuration.

use serde::{Deserialize, Serialize};

/// Settings for generation mode.
///
/// Every field has a default, so partial configuration files are fine:
///
/// ```toml
/// runtime_path = "crate::validation"
/// header = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Path of the runtime crate in emitted code.
    pub runtime_path: String,
    /// Appended to the namespace to name each generated file.
    pub file_suffix: String,
    /// Emit the "generated, do not edit" banner.
    pub header: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            runtime_path: "::tagval_validator".to_owned(),
            file_suffix: "_tagval.rs".to_owned(),
            header: true,
        }
    }
}

impl GeneratorConfig {
    /// File name for the validators of `namespace`.
    ///
    /// An empty namespace is written as `validators`.
    pub fn file_name(&self, namespace: &str) -> String {
        let stem = if namespace.is_empty() {
            "validators"
        } else {
            namespace
        };
        format!("{stem}{}", self.file_suffix)
    }
}
