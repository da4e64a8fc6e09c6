use serde::Serialize;

/// Host item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Equipment,
    Consumable,
    Tool,
    Loot,
}

/// One derived inventory item. An unclassifiable record yields
/// `ParsedItem::default()`, whose `kind` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedItem {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ItemKind>,
    pub data: ItemData,
    pub flags: ItemFlags,
}

impl ParsedItem {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    pub description: String,
    pub quantity: i32,
    pub weight: f64,
    pub price: f64,
    pub equipped: bool,
    pub attuned: bool,
    /// 0 = not required, 1 = required, 2 = attuned.
    pub attunement: u8,
    pub rarity: String,
    pub identified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub armor: Option<ArmorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<i32>,
    pub stealth: bool,
    pub damage: DamageSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapon_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumable_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<String>,
    pub properties: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<ItemRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    pub attack_bonus: i32,
    pub proficient: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses: Option<ItemUses>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArmorValue {
    pub value: i32,
    #[serde(rename = "type")]
    pub kind: String,
    /// DEX cap, `None` = uncapped.
    pub dex: Option<i32>,
}

/// `(formula, damage type)`, serialized as a two-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DamagePart(pub String, pub String);

impl DamagePart {
    pub fn new(formula: impl Into<String>, damage_type: impl Into<String>) -> Self {
        Self(formula.into(), damage_type.into())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DamageSpec {
    pub parts: Vec<DamagePart>,
    pub versatile: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRange {
    pub value: Option<i32>,
    pub long: Option<i32>,
    pub units: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemUses {
    pub value: i32,
    pub max: i32,
    pub per: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFlags {
    pub damage: DamageFlags,
    pub class_features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magic_items: Option<MagicItemFlags>,
}

/// Extra damage parts applied on top of the weapon's own damage.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DamageFlags {
    pub parts: Vec<DamagePart>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MagicItemFlags {
    pub enabled: bool,
    pub charges: i32,
    pub recharge: String,
    pub recharge_type: String,
    pub spells: Vec<MagicItemSpell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagicItemSpell {
    pub name: String,
    pub level: u8,
    pub consumption: i32,
}
