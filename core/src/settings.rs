//! # Generation Settings
//!
//! Read-only configuration consumed by the parameter builders.

use serde::{Deserialize, Serialize};

/// Default value advertised as the `$top` example.
pub const DEFAULT_TOP_EXAMPLE: u32 = 50;

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationSettings {
    /// Example value attached to the shared `$top` parameter.
    pub top_example: u32,
    /// Prefix key parameter names with `{EntityType}-`.
    pub prefix_entity_type_name_before_key: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            top_example: DEFAULT_TOP_EXAMPLE,
            prefix_entity_type_name_before_key: false,
        }
    }
}

impl GenerationSettings {
    /// Sets the `$top` example value.
    pub fn with_top_example(mut self, top_example: u32) -> Self {
        self.top_example = top_example;
        self
    }

    /// Enables or disables the entity type prefix on key parameters.
    pub fn with_key_prefix(mut self, enabled: bool) -> Self {
        self.prefix_entity_type_name_before_key = enabled;
        self
    }
}
