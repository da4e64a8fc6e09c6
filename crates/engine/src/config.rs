//! Engine configuration from the environment.

use charsheet_domain::ImportSettings;

/// Default number of resource trackers on the sheet.
pub const DEFAULT_RESOURCE_TRACKERS: usize = 3;

/// Runtime configuration for the `charsheet` binary.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub settings: ImportSettings,
    /// Pretty-print the output JSON.
    pub pretty: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settings: ImportSettings::default(),
            pretty: true,
        }
    }
}

impl EngineConfig {
    /// Create config from environment variables.
    ///
    /// Reads `CHARSHEET_RESOURCE_TRACKERS`, `CHARSHEET_IMPORT_CUSTOM_ITEMS`,
    /// `CHARSHEET_APPLY_CUSTOM_VALUES`, `CHARSHEET_PACT_CASTERS` (comma
    /// separated) and `CHARSHEET_PRETTY`, falling back to defaults if not set
    /// or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .and_then(|v| parse_flag(&v))
                .unwrap_or(default)
        };

        let resource_trackers = lookup("CHARSHEET_RESOURCE_TRACKERS")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_RESOURCE_TRACKERS)
            .min(DEFAULT_RESOURCE_TRACKERS);

        let pact_caster_classes = lookup("CHARSHEET_PACT_CASTERS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|classes| !classes.is_empty())
            .unwrap_or(defaults.settings.pact_caster_classes);

        Self {
            settings: ImportSettings {
                resource_trackers,
                import_custom_items: flag(
                    "CHARSHEET_IMPORT_CUSTOM_ITEMS",
                    defaults.settings.import_custom_items,
                ),
                apply_custom_values: flag(
                    "CHARSHEET_APPLY_CUSTOM_VALUES",
                    defaults.settings.apply_custom_values,
                ),
                pact_caster_classes,
            },
            pretty: flag("CHARSHEET_PRETTY", defaults.pretty),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]), EngineConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("CHARSHEET_RESOURCE_TRACKERS", "1"),
            ("CHARSHEET_IMPORT_CUSTOM_ITEMS", "false"),
            ("CHARSHEET_PACT_CASTERS", "Warlock, Hexblade"),
            ("CHARSHEET_PRETTY", "0"),
        ]);
        assert_eq!(config.settings.resource_trackers, 1);
        assert!(!config.settings.import_custom_items);
        assert!(config.settings.apply_custom_values);
        assert_eq!(config.settings.pact_caster_classes, vec!["Warlock", "Hexblade"]);
        assert!(!config.pretty);
    }

    #[test]
    fn tracker_count_is_capped_and_garbage_ignored() {
        let config = config_from(&[
            ("CHARSHEET_RESOURCE_TRACKERS", "12"),
            ("CHARSHEET_PRETTY", "maybe"),
        ]);
        assert_eq!(config.settings.resource_trackers, 3);
        assert!(config.pretty);
    }
}
