use serde::Deserialize;

use super::{null_as_default, SourceId};

/// A granted rule effect ("modifier") as exported.
///
/// `kind`/`sub_type` select what the effect touches (`bonus`/`armor-class`,
/// `set`/`unarmored-armor-class`, `proficiency`/`stealth`, ...). The
/// `restriction` is free text; unconditioned effects carry `""` or `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleEffect {
    #[serde(deserialize_with = "null_as_default")]
    pub id: SourceId,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sub_type: String,
    pub value: Option<i32>,
    pub dice: Option<DiceValue>,
    pub stat_id: Option<u8>,
    pub entity_id: Option<i64>,
    pub component_id: Option<i64>,
    pub restriction: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_granted: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub friendly_type_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub friendly_subtype_name: String,
}

impl RuleEffect {
    pub fn value_or_zero(&self) -> i32 {
        self.value.unwrap_or(0)
    }

    /// Restriction text, with `null` folded into `""`.
    pub fn restriction_text(&self) -> &str {
        self.restriction.as_deref().unwrap_or("")
    }

    pub fn dice_string(&self) -> Option<&str> {
        self.dice
            .as_ref()
            .and_then(|d| d.dice_string.as_deref())
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiceValue {
    pub dice_count: Option<i32>,
    pub dice_value: Option<i32>,
    pub fixed_value: Option<i32>,
    pub dice_string: Option<String>,
}

/// Effects grouped by where the character got them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModifierGroups {
    #[serde(deserialize_with = "null_as_default")]
    pub class: Vec<RuleEffect>,
    #[serde(deserialize_with = "null_as_default")]
    pub race: Vec<RuleEffect>,
    #[serde(deserialize_with = "null_as_default")]
    pub background: Vec<RuleEffect>,
    #[serde(deserialize_with = "null_as_default")]
    pub feat: Vec<RuleEffect>,
}
