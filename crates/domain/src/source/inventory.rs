use serde::Deserialize;

use super::{null_as_default, DiceValue, RuleEffect};

/// An inventory record: the item definition plus per-character state.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub definition: ItemDefinition,
    #[serde(deserialize_with = "null_as_default")]
    pub equipped: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_attuned: bool,
    pub quantity: Option<i32>,
    pub limited_use: Option<LimitedUse>,
}

impl InventoryEntry {
    /// Magic effects only apply when no attunement is needed or it is attuned.
    pub fn effects_available(&self) -> bool {
        !self.definition.can_attune || self.is_attuned
    }

    pub fn quantity(&self) -> i32 {
        self.quantity.unwrap_or(1)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemDefinition {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub filter_type: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub sub_type: Option<String>,
    pub armor_class: Option<i32>,
    pub armor_type_id: Option<u8>,
    pub strength_requirement: Option<i32>,
    /// 2 means disadvantage on Stealth checks.
    pub stealth_check: Option<u8>,
    #[serde(deserialize_with = "null_as_default")]
    pub granted_modifiers: Vec<RuleEffect>,
    /// 1 = melee, 2 = ranged.
    pub attack_type: Option<u8>,
    /// 1 = simple, 2 = martial.
    pub category_id: Option<u8>,
    pub damage: Option<DiceValue>,
    pub damage_type: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub properties: Vec<WeaponProperty>,
    pub range: Option<i32>,
    pub long_range: Option<i32>,
    #[serde(deserialize_with = "null_as_default")]
    pub can_attune: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub magic: bool,
    pub rarity: Option<String>,
    pub weight: Option<f64>,
    pub cost: Option<f64>,
    pub description: Option<String>,
    pub snippet: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_consumable: bool,
    pub bundle_size: Option<i32>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl ItemDefinition {
    pub fn is_shield(&self) -> bool {
        self.item_type.as_deref() == Some("Shield") || self.armor_type_id == Some(4)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name == name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeaponProperty {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub notes: Option<String>,
}

/// Charges / limited uses of an item, action, or item spell.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LimitedUse {
    pub max_uses: Option<i32>,
    pub number_used: Option<i32>,
    /// 1 = short rest, 2 = long rest, 3 = dawn, 4 = other.
    pub reset_type: Option<u8>,
    pub reset_type_description: Option<String>,
    pub min_number_consumed: Option<i32>,
}

impl LimitedUse {
    pub fn max(&self) -> i32 {
        self.max_uses.unwrap_or(0)
    }

    pub fn used(&self) -> i32 {
        self.number_used.unwrap_or(0)
    }
}

/// A homebrew item added directly on the character.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomItem {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub weight: Option<f64>,
    pub cost: Option<f64>,
    pub quantity: Option<i32>,
}

/// Spell granted by a magic item (`spells.item[]`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemSpell {
    /// Definition id of the granting item.
    #[serde(deserialize_with = "null_as_default")]
    pub component_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub definition: SpellDefinition,
    pub limited_use: Option<LimitedUse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpellDefinition {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub level: u8,
}
