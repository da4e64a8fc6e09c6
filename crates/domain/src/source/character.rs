use serde::Deserialize;

use super::{
    null_as_default, CustomItem, InventoryEntry, ItemSpell, LimitedUse, ModifierGroups,
    ScalarValue, SourceId,
};

/// Root of an export file: `{ "character": { ... } }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CharacterDocument {
    pub character: SourceCharacter,
}

/// The exported character record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceCharacter {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub stats: Vec<StatEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub bonus_stats: Vec<StatEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub override_stats: Vec<StatEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub modifiers: ModifierGroups,
    #[serde(deserialize_with = "null_as_default")]
    pub classes: Vec<CharacterClass>,
    #[serde(deserialize_with = "null_as_default")]
    pub inventory: Vec<InventoryEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_items: Vec<CustomItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub class_spells: Vec<ClassSpells>,
    #[serde(deserialize_with = "null_as_default")]
    pub pact_magic: Vec<SlotUsage>,
    #[serde(deserialize_with = "null_as_default")]
    pub spell_slots: Vec<SlotUsage>,
    #[serde(deserialize_with = "null_as_default")]
    pub race: Race,
    #[serde(deserialize_with = "null_as_default")]
    pub feats: Vec<Feat>,
    #[serde(deserialize_with = "null_as_default")]
    pub traits: PersonalityTraits,
    #[serde(deserialize_with = "null_as_default")]
    pub background: Background,
    #[serde(deserialize_with = "null_as_default")]
    pub currencies: Currencies,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_proficiencies: Vec<CustomProficiency>,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_defense_adjustments: Vec<CustomDefenseAdjustment>,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_senses: Vec<CustomSense>,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_speeds: Vec<CustomSpeed>,
    #[serde(deserialize_with = "null_as_default")]
    pub character_values: Vec<CharacterValue>,
    #[serde(deserialize_with = "null_as_default")]
    pub options: ChoiceOptions,
    #[serde(deserialize_with = "null_as_default")]
    pub actions: ActionGroups,
    #[serde(deserialize_with = "null_as_default")]
    pub spells: SpellGroups,
    #[serde(deserialize_with = "null_as_default")]
    pub death_saves: DeathSaves,
    #[serde(deserialize_with = "null_as_default")]
    pub conditions: Vec<ActiveCondition>,
    pub base_hit_points: Option<i32>,
    pub bonus_hit_points: Option<i32>,
    pub override_hit_points: Option<i32>,
    pub removed_hit_points: Option<i32>,
    pub temporary_hit_points: Option<i32>,
    #[serde(deserialize_with = "null_as_default")]
    pub notes: Notes,
    pub alignment_id: Option<u8>,
    pub current_xp: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub inspiration: bool,
}

impl SourceCharacter {
    pub fn total_level(&self) -> i32 {
        self.classes.iter().map(|c| c.level).sum()
    }

    pub fn has_feat(&self, name: &str) -> bool {
        self.feats.iter().any(|f| f.definition.name == name)
    }

    pub fn has_racial_trait(&self, name: &str) -> bool {
        self.race
            .racial_traits
            .iter()
            .any(|t| t.definition.name == name)
    }

    /// Any class, race, or feat option chosen under this name.
    pub fn has_chosen_option(&self, name: &str) -> bool {
        self.options
            .class
            .iter()
            .chain(&self.options.race)
            .chain(&self.options.feat)
            .any(|o| o.definition.name == name)
    }

    /// The class that owns the class feature with this id.
    pub fn class_by_feature_id(&self, feature_id: i64) -> Option<&CharacterClass> {
        self.classes.iter().find(|cls| cls.owns_feature(feature_id))
    }

    pub fn class_by_id(&self, id: i64) -> Option<&CharacterClass> {
        self.classes.iter().find(|cls| cls.id == id)
    }
}

/// One entry of `stats`, `bonusStats` or `overrideStats`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u8,
    pub value: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterClass {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub level: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub hit_dice_used: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub is_starting_class: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub definition: ClassDefinition,
    pub subclass_definition: Option<ClassDefinition>,
    #[serde(deserialize_with = "null_as_default")]
    pub class_features: Vec<ClassFeatureEntry>,
}

impl CharacterClass {
    pub fn can_cast_spells(&self) -> bool {
        self.definition.can_cast_spells
            || self
                .subclass_definition
                .as_ref()
                .is_some_and(|s| s.can_cast_spells)
    }

    /// Whether a feature with this name is unlocked at the current level,
    /// looking at the class and (optionally) the subclass definition.
    pub fn has_feature(&self, name: &str, include_subclass: bool) -> bool {
        let unlocked = |def: &ClassDefinition| {
            def.class_features
                .iter()
                .any(|f| f.name == name && self.level >= f.required_level)
        };
        if include_subclass {
            self.subclass_definition.as_ref().is_some_and(unlocked)
        } else {
            unlocked(&self.definition)
        }
    }

    fn owns_feature(&self, feature_id: i64) -> bool {
        self.class_features
            .iter()
            .any(|f| f.definition.id == feature_id)
            || self.definition.class_features.iter().any(|f| f.id == feature_id)
            || self
                .subclass_definition
                .as_ref()
                .is_some_and(|s| s.class_features.iter().any(|f| f.id == feature_id))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassDefinition {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub can_cast_spells: bool,
    pub spell_casting_ability_id: Option<u8>,
    pub spell_rules: Option<SpellRules>,
    #[serde(deserialize_with = "null_as_default")]
    pub class_features: Vec<ClassFeature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassFeature {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub required_level: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassFeatureEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub definition: ClassFeature,
}

/// Per-level spell tables of a class.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpellRules {
    pub multi_class_spell_slot_divisor: Option<i32>,
    #[serde(deserialize_with = "null_as_default")]
    pub level_cantrips_known_maxes: Vec<i32>,
    /// Indexed by class level; each row lists slots for spell levels 1..9.
    #[serde(deserialize_with = "null_as_default")]
    pub level_spell_slots: Vec<Vec<i32>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassSpells {
    #[serde(deserialize_with = "null_as_default")]
    pub character_class_id: i64,
}

/// Used/available slots at one spell level.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SlotUsage {
    #[serde(deserialize_with = "null_as_default")]
    pub level: u8,
    #[serde(deserialize_with = "null_as_default")]
    pub used: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub available: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Race {
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub base_name: String,
    pub size: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub racial_traits: Vec<NamedDefinitionEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub weight_speeds: WeightSpeeds,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeightSpeeds {
    #[serde(deserialize_with = "null_as_default")]
    pub normal: MovementSpeeds,
}

/// Base speeds by movement type, in the exporter's field order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MovementSpeeds {
    #[serde(deserialize_with = "null_as_default")]
    pub walk: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub fly: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub burrow: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub swim: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub climb: i32,
}

impl MovementSpeeds {
    pub fn entries(&self) -> [(&'static str, i32); 5] {
        [
            ("walk", self.walk),
            ("fly", self.fly),
            ("burrow", self.burrow),
            ("swim", self.swim),
            ("climb", self.climb),
        ]
    }
}

/// Anything shaped `{ "definition": { "name": ... } }` (feats, racial
/// traits, chosen options).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamedDefinitionEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub definition: NamedDefinition,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamedDefinition {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

pub type Feat = NamedDefinitionEntry;
pub type CharacterOption = NamedDefinitionEntry;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalityTraits {
    pub personality_traits: Option<String>,
    pub ideals: Option<String>,
    pub bonds: Option<String>,
    pub flaws: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Background {
    #[serde(deserialize_with = "null_as_default")]
    pub has_custom_background: bool,
    pub definition: Option<BackgroundDefinition>,
    pub custom_background: Option<CustomBackground>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundDefinition {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub short_description: String,
    pub feature_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub feature_description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomBackground {
    pub name: Option<String>,
    pub description: Option<String>,
    pub features_background: Option<BackgroundFeatureBlock>,
    pub characteristics_background: Option<BackgroundFeatureBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundFeatureBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub short_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub feature_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub feature_description: String,
    pub entity_type_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Currencies {
    #[serde(deserialize_with = "null_as_default")]
    pub pp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub gp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub ep: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub sp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub cp: i64,
}

/// `type`: 1 = skill, 2 = tool, 3 = language.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomProficiency {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: u8,
}

/// `type`: 1 = condition, 2 = damage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomDefenseAdjustment {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u16,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSense {
    #[serde(deserialize_with = "null_as_default")]
    pub sense_id: u8,
    pub distance: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSpeed {
    #[serde(deserialize_with = "null_as_default")]
    pub movement_id: u8,
    #[serde(deserialize_with = "null_as_default")]
    pub distance: i32,
}

/// Character-level custom value: overrides and feature bindings keyed by
/// `typeId` (and `valueTypeId`), pointing at `valueId`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterValue {
    #[serde(deserialize_with = "null_as_default")]
    pub type_id: i64,
    pub value: Option<ScalarValue>,
    pub value_id: Option<SourceId>,
    pub value_type_id: Option<i64>,
}

impl CharacterValue {
    pub fn targets(&self, id: i64) -> bool {
        self.value_id.as_ref().and_then(SourceId::as_i64) == Some(id)
    }

    pub fn has_value(&self) -> bool {
        self.value.as_ref().is_some_and(ScalarValue::is_present)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChoiceOptions {
    #[serde(deserialize_with = "null_as_default")]
    pub class: Vec<CharacterOption>,
    #[serde(deserialize_with = "null_as_default")]
    pub race: Vec<CharacterOption>,
    #[serde(deserialize_with = "null_as_default")]
    pub feat: Vec<CharacterOption>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActionGroups {
    #[serde(deserialize_with = "null_as_default")]
    pub race: Vec<SourceAction>,
    #[serde(deserialize_with = "null_as_default")]
    pub class: Vec<SourceAction>,
    #[serde(deserialize_with = "null_as_default")]
    pub feat: Vec<SourceAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceAction {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub limited_use: Option<LimitedUse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpellGroups {
    #[serde(deserialize_with = "null_as_default")]
    pub item: Vec<ItemSpell>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeathSaves {
    pub success_count: Option<i32>,
    pub fail_count: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActiveCondition {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u8,
    pub level: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Notes {
    pub backstory: Option<String>,
}
