//! Lookup tables translating the export's names and ids into sheet keys.

use crate::value_objects::Ability;

/// A sheet skill and the ability it keys off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub ability: Ability,
}

const fn skill(key: &'static str, label: &'static str, ability: Ability) -> SkillInfo {
    SkillInfo {
        key,
        label,
        ability,
    }
}

pub const SKILLS: [SkillInfo; 18] = [
    skill("acr", "Acrobatics", Ability::Dex),
    skill("ani", "Animal Handling", Ability::Wis),
    skill("arc", "Arcana", Ability::Int),
    skill("ath", "Athletics", Ability::Str),
    skill("dec", "Deception", Ability::Cha),
    skill("his", "History", Ability::Int),
    skill("ins", "Insight", Ability::Wis),
    skill("itm", "Intimidation", Ability::Cha),
    skill("inv", "Investigation", Ability::Int),
    skill("med", "Medicine", Ability::Wis),
    skill("nat", "Nature", Ability::Int),
    skill("prc", "Perception", Ability::Wis),
    skill("prf", "Performance", Ability::Cha),
    skill("per", "Persuasion", Ability::Cha),
    skill("rel", "Religion", Ability::Int),
    skill("slt", "Sleight of Hand", Ability::Dex),
    skill("ste", "Stealth", Ability::Dex),
    skill("sur", "Survival", Ability::Wis),
];

/// Sense names by `senseId` / `entityId`.
pub const SENSES: [(u8, &str); 4] = [
    (1, "Blindsight"),
    (2, "Darkvision"),
    (3, "Tremorsense"),
    (4, "Truesight"),
];

pub fn sense_name(id: u8) -> Option<&'static str> {
    SENSES.iter().find(|(sid, _)| *sid == id).map(|(_, n)| *n)
}

/// Movement type keys by `movementId`.
pub const MOVEMENT_TYPES: [(u8, &str); 5] = [
    (1, "walk"),
    (2, "burrow"),
    (3, "climb"),
    (4, "fly"),
    (5, "swim"),
];

pub fn movement_type(id: u8) -> Option<&'static str> {
    MOVEMENT_TYPES
        .iter()
        .find(|(mid, _)| *mid == id)
        .map(|(_, t)| *t)
}

/// Languages the sheet knows natively; anything else is custom text.
pub const LANGUAGES: [(&str, &str); 23] = [
    ("Common", "common"),
    ("Dwarvish", "dwarvish"),
    ("Elvish", "elvish"),
    ("Giant", "giant"),
    ("Gnomish", "gnomish"),
    ("Goblin", "goblin"),
    ("Halfling", "halfling"),
    ("Orc", "orc"),
    ("Abyssal", "abyssal"),
    ("Celestial", "celestial"),
    ("Draconic", "draconic"),
    ("Deep Speech", "deep"),
    ("Infernal", "infernal"),
    ("Primordial", "primordial"),
    ("Sylvan", "sylvan"),
    ("Undercommon", "undercommon"),
    ("Druidic", "druidic"),
    ("Thieves' Cant", "cant"),
    ("Aquan", "aquan"),
    ("Auran", "auran"),
    ("Ignan", "ignan"),
    ("Terran", "terran"),
    ("Gith", "gith"),
];

pub fn language_key(name: &str) -> Option<&'static str> {
    LANGUAGES.iter().find(|(n, _)| *n == name).map(|(_, k)| *k)
}

pub const ACTOR_SIZES: [(&str, &str); 6] = [
    ("Tiny", "tiny"),
    ("Small", "sm"),
    ("Medium", "med"),
    ("Large", "lg"),
    ("Huge", "huge"),
    ("Gargantuan", "grg"),
];

pub fn size_key(name: &str) -> Option<&'static str> {
    ACTOR_SIZES.iter().find(|(n, _)| *n == name).map(|(_, k)| *k)
}

pub const ALIGNMENTS: [(u8, &str); 9] = [
    (1, "Lawful Good"),
    (2, "Neutral Good"),
    (3, "Chaotic Good"),
    (4, "Lawful Neutral"),
    (5, "Neutral"),
    (6, "Chaotic Neutral"),
    (7, "Lawful Evil"),
    (8, "Neutral Evil"),
    (9, "Chaotic Evil"),
];

pub const DEFAULT_ALIGNMENT_ID: u8 = 5;

pub fn alignment_name(id: u8) -> Option<&'static str> {
    ALIGNMENTS.iter().find(|(aid, _)| *aid == id).map(|(_, n)| *n)
}

/// Which defensive list an adjustment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentKind {
    Resistance,
    Immunity,
    Vulnerability,
}

impl AdjustmentKind {
    /// Rule effect `type` carrying this adjustment.
    pub fn effect_kind(&self) -> &'static str {
        match self {
            Self::Resistance => "resistance",
            Self::Immunity => "immunity",
            Self::Vulnerability => "vulnerability",
        }
    }
}

/// `customDefenseAdjustments[].type`
pub const ADJUSTMENT_TYPE_CONDITION: u8 = 1;
pub const ADJUSTMENT_TYPE_DAMAGE: u8 = 2;

/// Damage types: (effect subtype, sheet value).
pub const DAMAGE_TYPES: [(&str, &str); 14] = [
    ("bludgeoning", "bludgeoning"),
    ("piercing", "piercing"),
    ("slashing", "slashing"),
    ("lightning", "lightning"),
    ("thunder", "thunder"),
    ("poison", "poison"),
    ("cold", "cold"),
    ("radiant", "radiant"),
    ("fire", "fire"),
    ("necrotic", "necrotic"),
    ("acid", "acid"),
    ("psychic", "psychic"),
    ("force", "force"),
    ("bludgeoning-piercing-and-slashing-from-nonmagical-attacks", "physical"),
];

/// Conditions: (effect subtype, sheet value).
pub const CONDITIONS: [(&str, &str); 15] = [
    ("blinded", "blinded"),
    ("charmed", "charmed"),
    ("deafened", "deafened"),
    ("exhaustion", "exhaustion"),
    ("frightened", "frightened"),
    ("grappled", "grappled"),
    ("incapacitated", "incapacitated"),
    ("invisible", "invisible"),
    ("paralyzed", "paralyzed"),
    ("petrified", "petrified"),
    ("poisoned", "poisoned"),
    ("prone", "prone"),
    ("restrained", "restrained"),
    ("stunned", "stunned"),
    ("unconscious", "unconscious"),
];

fn adjustment_table(type_id: u8) -> &'static [(&'static str, &'static str)] {
    if type_id == ADJUSTMENT_TYPE_CONDITION {
        &CONDITIONS
    } else {
        &DAMAGE_TYPES
    }
}

/// First custom adjustment id for a (type, kind) block. Custom adjustment ids
/// are allocated in blocks of 16 following the table order.
fn adjustment_id_base(type_id: u8, kind: AdjustmentKind) -> Option<u16> {
    match (type_id, kind) {
        (ADJUSTMENT_TYPE_DAMAGE, AdjustmentKind::Resistance) => Some(1),
        (ADJUSTMENT_TYPE_DAMAGE, AdjustmentKind::Immunity) => Some(17),
        (ADJUSTMENT_TYPE_DAMAGE, AdjustmentKind::Vulnerability) => Some(33),
        (ADJUSTMENT_TYPE_CONDITION, AdjustmentKind::Immunity) => Some(1),
        _ => None,
    }
}

/// Sheet value for an effect subtype, if the subtype is a known damage type
/// (type 2) or condition (type 1).
pub fn adjustment_value(type_id: u8, sub_type: &str) -> Option<&'static str> {
    adjustment_table(type_id)
        .iter()
        .find(|(s, _)| *s == sub_type)
        .map(|(_, v)| *v)
}

/// Sheet value for a `customDefenseAdjustments` entry.
pub fn custom_adjustment_value(type_id: u8, kind: AdjustmentKind, id: u16) -> Option<&'static str> {
    let base = adjustment_id_base(type_id, kind)?;
    let index = id.checked_sub(base)? as usize;
    adjustment_table(type_id).get(index).map(|(_, v)| *v)
}

/// Proficiency groups collapsed to a sheet abbreviation.
pub const ARMOR_PROFICIENCIES: [(&str, &str); 4] = [
    ("Light Armor", "lgt"),
    ("Medium Armor", "med"),
    ("Heavy Armor", "hvy"),
    ("Shields", "shl"),
];

pub const WEAPON_PROFICIENCIES: [(&str, &str); 2] =
    [("Simple Weapons", "sim"), ("Martial Weapons", "mar")];

pub const TOOL_PROFICIENCIES: [(&str, &str); 11] = [
    ("Artisan's Tools", "art"),
    ("Disguise Kit", "disg"),
    ("Forgery Kit", "forg"),
    ("Gaming Set", "game"),
    ("Musical Instrument", "music"),
    ("Thieves' Tools", "thief"),
    ("Navigator's Tools", "navg"),
    ("Poisoner's Kit", "pois"),
    ("Vehicle (Land or Water)", "vehicle"),
    ("Vehicle (Land)", "vehicle"),
    ("Vehicle (Water)", "vehicle"),
];

/// Individually named proficiencies the sheet keeps as custom text.
pub const NAMED_WEAPONS: [&str; 37] = [
    "Club",
    "Dagger",
    "Greatclub",
    "Handaxe",
    "Javelin",
    "Light Hammer",
    "Mace",
    "Quarterstaff",
    "Sickle",
    "Spear",
    "Crossbow, Light",
    "Dart",
    "Shortbow",
    "Sling",
    "Battleaxe",
    "Flail",
    "Glaive",
    "Greataxe",
    "Greatsword",
    "Halberd",
    "Lance",
    "Longsword",
    "Maul",
    "Morningstar",
    "Pike",
    "Rapier",
    "Scimitar",
    "Shortsword",
    "Trident",
    "War Pick",
    "Warhammer",
    "Whip",
    "Blowgun",
    "Crossbow, Hand",
    "Crossbow, Heavy",
    "Longbow",
    "Net",
];

pub const NAMED_TOOLS: [&str; 31] = [
    "Alchemist's Supplies",
    "Brewer's Supplies",
    "Calligrapher's Supplies",
    "Carpenter's Tools",
    "Cartographer's Tools",
    "Cobbler's Tools",
    "Cook's Utensils",
    "Glassblower's Tools",
    "Jeweler's Tools",
    "Leatherworker's Tools",
    "Mason's Tools",
    "Painter's Supplies",
    "Potter's Tools",
    "Smith's Tools",
    "Tinker's Tools",
    "Weaver's Tools",
    "Woodcarver's Tools",
    "Herbalism Kit",
    "Dice Set",
    "Playing Card Set",
    "Dragonchess Set",
    "Three-Dragon Ante Set",
    "Bagpipes",
    "Drum",
    "Dulcimer",
    "Flute",
    "Lute",
    "Lyre",
    "Horn",
    "Pan Flute",
    "Shawm",
];

/// `characterValues` type ids that override an inventory item's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOverride {
    Name,
    Price,
    Weight,
}

pub const ITEM_VALUE_OVERRIDES: [(i64, ItemOverride); 3] = [
    (8, ItemOverride::Name),
    (19, ItemOverride::Price),
    (22, ItemOverride::Weight),
];

pub fn item_override(type_id: i64) -> Option<ItemOverride> {
    ITEM_VALUE_OVERRIDES
        .iter()
        .find(|(t, _)| *t == type_id)
        .map(|(_, o)| *o)
}

/// `characterValues` (typeId, valueTypeId) pairs that bind a class feature
/// to an item.
pub const ITEM_FEATURE_BINDINGS: [(i64, i64, &str); 2] = [
    (28, 1439493548, "hexWeapon"),
    (29, 1439493548, "pactWeapon"),
];

pub fn item_feature_binding(type_id: i64, value_type_id: Option<i64>) -> Option<&'static str> {
    ITEM_FEATURE_BINDINGS
        .iter()
        .find(|(t, v, _)| *t == type_id && Some(*v) == value_type_id)
        .map(|(_, _, name)| *name)
}

/// Warlock invocations that apply to a bound pact weapon.
pub const PACT_WEAPON_FEATURES: [&str; 4] = [
    "Improved Pact Weapon",
    "Lifedrinker",
    "Thirsting Blade",
    "Eldritch Smite",
];
