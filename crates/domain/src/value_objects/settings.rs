//! Import settings value object
//!
//! Settings carry serde derives so they can be read from a JSON/env layer by
//! the engine; every field has a default so partial documents are accepted.

use serde::{Deserialize, Serialize};

/// Knobs that change how a character export is turned into a sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportSettings {
    /// Number of limited-use trackers surfaced as sheet resources.
    #[serde(default = "default_resource_trackers")]
    pub resource_trackers: usize,

    /// Parse `customItems` after the regular inventory.
    #[serde(default = "default_true")]
    pub import_custom_items: bool,

    /// Apply name/weight/price overrides from `characterValues` to items.
    #[serde(default = "default_true")]
    pub apply_custom_values: bool,

    /// Classes whose slots form a separate pact pool.
    #[serde(default = "default_pact_casters")]
    pub pact_caster_classes: Vec<String>,
}

fn default_resource_trackers() -> usize { 3 }
fn default_true() -> bool { true }
fn default_pact_casters() -> Vec<String> {
    vec!["Warlock".to_string(), "Blood Hunter".to_string()]
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            resource_trackers: default_resource_trackers(),
            import_custom_items: default_true(),
            apply_custom_values: default_true(),
            pact_caster_classes: default_pact_casters(),
        }
    }
}

impl ImportSettings {
    pub fn is_pact_caster(&self, class_name: &str) -> bool {
        self.pact_caster_classes.iter().any(|c| c == class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let settings: ImportSettings =
            serde_json::from_str(r#"{ "resource_trackers": 5 }"#).expect("settings");
        assert_eq!(settings.resource_trackers, 5);
        assert!(settings.import_custom_items);
        assert!(settings.is_pact_caster("Warlock"));
        assert!(settings.is_pact_caster("Blood Hunter"));
        assert!(!settings.is_pact_caster("Wizard"));
    }

    #[test]
    fn empty_document_equals_default() {
        let settings: ImportSettings = serde_json::from_str("{}").expect("settings");
        assert_eq!(settings, ImportSettings::default());
    }
}
