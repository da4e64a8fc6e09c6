//! The derived character sheet.
//!
//! Built once per derivation and then treated as a value. Field names follow
//! the tabletop host's actor schema, which is why a few of them are terse
//! (`hd`, `spelldc`, `di`/`dr`/`dv`/`ci`).

mod item;

pub use item::*;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::value_objects::{serialize_blank_when_zero, Ability, BonusExpr, ProficiencyLevel};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedCharacter {
    pub name: String,
    pub abilities: Abilities,
    pub attributes: Attributes,
    pub resources: Resources,
    pub details: Details,
    pub traits: SheetTraits,
    pub currency: Currency,
    pub skills: BTreeMap<String, SkillScore>,
    pub spells: SpellSlots,
    pub bonuses: Bonuses,
    pub flags: SheetFlags,
    pub token: TokenVision,
    pub items: Vec<ParsedItem>,
}

// =============================================================================
// Abilities
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbilityScore {
    pub value: i32,
    pub min: i32,
    #[serde(rename = "mod")]
    pub modifier: i32,
    /// Saving throw proficiency, 0 or 1.
    pub proficient: u8,
}

impl Default for AbilityScore {
    fn default() -> Self {
        Self {
            value: 10,
            min: 3,
            modifier: 0,
            proficient: 0,
        }
    }
}

/// The six scores keyed `str`..`cha`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Abilities(BTreeMap<Ability, AbilityScore>);

impl Default for Abilities {
    fn default() -> Self {
        Self(
            Ability::ALL
                .into_iter()
                .map(|a| (a, AbilityScore::default()))
                .collect(),
        )
    }
}

impl Abilities {
    pub fn set(&mut self, ability: Ability, score: AbilityScore) {
        self.0.insert(ability, score);
    }

    pub fn get(&self, ability: Ability) -> Option<&AbilityScore> {
        self.0.get(&ability)
    }

    pub fn value(&self, ability: Ability) -> i32 {
        self.get(ability).map_or(10, |s| s.value)
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        self.get(ability).map_or(0, |s| s.modifier)
    }
}

// =============================================================================
// Attributes
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Attributes {
    pub ac: ArmorClass,
    pub hp: HitPoints,
    /// Remaining hit dice.
    pub hd: i32,
    pub death: DeathSaveTally,
    pub exhaustion: i32,
    pub inspiration: bool,
    pub init: Initiative,
    pub speed: Speed,
    pub prof: i32,
    /// Ability key of the spellcasting ability, or empty.
    pub spellcasting: String,
    pub spelldc: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArmorClass {
    pub value: i32,
    /// Every computed (armor, shield) option, in computation order.
    pub candidates: Vec<ArmorClassOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArmorClassOption {
    pub name: String,
    pub value: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HitPoints {
    pub value: i32,
    pub min: i32,
    pub max: i32,
    pub temp: i32,
    pub tempmax: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeathSaveTally {
    pub success: i32,
    pub failure: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Initiative {
    pub value: BonusExpr,
    pub bonus: i32,
    #[serde(rename = "mod")]
    pub modifier: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Speed {
    pub value: String,
    pub special: String,
}

impl Default for Speed {
    fn default() -> Self {
        Self {
            value: "30 ft".to_string(),
            special: String::new(),
        }
    }
}

// =============================================================================
// Resources, details, traits
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resources {
    pub primary: Resource,
    pub secondary: Resource,
    pub tertiary: Resource,
}

impl Resources {
    pub fn slots_mut(&mut self) -> [&mut Resource; 3] {
        [&mut self.primary, &mut self.secondary, &mut self.tertiary]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resource {
    pub label: String,
    pub value: i32,
    pub max: i32,
    /// Recovers on a short rest.
    pub sr: bool,
    /// Recovers on a long rest.
    pub lr: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Details {
    pub background: String,
    pub xp: Experience,
    #[serde(rename = "trait")]
    pub personality_trait: String,
    pub ideal: String,
    pub bond: String,
    pub flaw: String,
    pub alignment: String,
    pub biography: Biography,
    pub race: String,
    pub level: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Experience {
    pub value: i64,
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Biography {
    pub value: String,
    pub public: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetTraits {
    pub size: String,
    pub senses: String,
    pub languages: TraitSet,
    pub di: TraitSet,
    pub dr: TraitSet,
    pub dv: TraitSet,
    pub ci: TraitSet,
    pub weapon_prof: TraitSet,
    pub armor_prof: TraitSet,
    pub tool_prof: TraitSet,
}

impl Default for SheetTraits {
    fn default() -> Self {
        Self {
            size: "med".to_string(),
            senses: String::new(),
            languages: TraitSet::default(),
            di: TraitSet::default(),
            dr: TraitSet::default(),
            dv: TraitSet::default(),
            ci: TraitSet::default(),
            weapon_prof: TraitSet::default(),
            armor_prof: TraitSet::default(),
            tool_prof: TraitSet::default(),
        }
    }
}

/// Known keys plus free text for anything the host has no key for.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TraitSet {
    pub value: Vec<String>,
    pub custom: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Currency {
    pub pp: i64,
    pub gp: i64,
    pub ep: i64,
    pub sp: i64,
    pub cp: i64,
}

// =============================================================================
// Skills and spells
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillScore {
    pub label: String,
    pub ability: Ability,
    /// Proficiency level: 0, 0.5, 1 or 2.
    pub value: ProficiencyLevel,
    #[serde(rename = "mod")]
    pub modifier: i32,
    pub bonus: i32,
    pub passive: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlotPool {
    pub value: i32,
    pub max: i32,
}

impl SlotPool {
    pub fn new(max: i32, used: i32) -> Self {
        Self {
            value: max - used,
            max,
        }
    }
}

/// Slots per spell level (0 = cantrips known) plus the pact pool.
/// Serialized as `spell0`..`spell9` and `pact`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpellSlots {
    pub levels: [SlotPool; 10],
    pub pact: PactSlots,
}

impl SpellSlots {
    pub fn level(&self, level: usize) -> SlotPool {
        self.levels.get(level).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PactSlots {
    pub value: i32,
    pub max: i32,
    /// Spell level of the pact slots, 0 when there are none.
    pub level: u8,
}

impl Serialize for SpellSlots {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.levels.len() + 1))?;
        for (level, pool) in self.levels.iter().enumerate() {
            map.serialize_entry(&format!("spell{}", level), pool)?;
        }
        map.serialize_entry("pact", &self.pact)?;
        map.end()
    }
}

// =============================================================================
// Bonuses, flags, token
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Bonuses {
    pub abilities: AbilityBonuses,
    /// Ranged spell attacks.
    pub rsak: AttackBonus,
    /// Melee spell attacks.
    pub msak: AttackBonus,
    /// Melee weapon attacks.
    pub mwak: AttackBonus,
    /// Ranged weapon attacks.
    pub rwak: AttackBonus,
    pub spell: SpellBonus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AbilityBonuses {
    pub check: BonusExpr,
    pub save: BonusExpr,
    pub skill: BonusExpr,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttackBonus {
    #[serde(serialize_with = "serialize_blank_when_zero")]
    pub attack: BonusExpr,
    #[serde(serialize_with = "serialize_blank_when_zero")]
    pub damage: BonusExpr,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpellBonus {
    pub dc: BonusExpr,
}

/// Rule-exception flags the host reads for built-in automation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetFlags {
    pub total_levels: i32,
    /// Friendly names of every proficiency effect.
    pub proficiencies: Vec<String>,
    pub powerful_build: bool,
    pub savage_attacks: bool,
    pub elven_accuracy: bool,
    pub halfling_lucky: bool,
    pub initiative_adv: bool,
    pub initiative_alert: bool,
    pub initiative_half_prof: bool,
    pub jack_of_all_trades: bool,
    pub weapon_critical_threshold: u8,
    pub observant_feat: bool,
    pub remarkable_athlete: bool,
    pub reliable_talent: bool,
}

impl Default for SheetFlags {
    fn default() -> Self {
        Self {
            total_levels: 0,
            proficiencies: Vec::new(),
            powerful_build: false,
            savage_attacks: false,
            elven_accuracy: false,
            halfling_lucky: false,
            initiative_adv: false,
            initiative_alert: false,
            initiative_half_prof: false,
            jack_of_all_trades: false,
            weapon_critical_threshold: 20,
            observant_feat: false,
            remarkable_athlete: false,
            reliable_talent: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenVision {
    pub bright_sight: i32,
    pub dim_sight: i32,
}
