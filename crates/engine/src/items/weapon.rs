//! Weapons and ammunition.

use charsheet_domain::game_systems::dictionary::{item_feature_binding, PACT_WEAPON_FEATURES};
use charsheet_domain::game_systems::{exceptions_where, Exception, Trigger};
use charsheet_domain::sheet::{DamagePart, ItemFlags, ItemRange};
use charsheet_domain::source::{DiceValue, ItemDefinition};
use charsheet_domain::{Ability, InventoryEntry, ItemKind, ParsedItem, SourceCharacter};

use super::{base_item, ItemContext, ItemParser, ItemRoute};
use crate::modifier_index::ModifierIndex;

/// `attackType` of melee weapons.
const MELEE: u8 = 1;

/// Restriction carried by extra damage that applies to melee weapon attacks.
const MELEE_WEAPON_ATTACKS: &[&str] = &["Melee Weapon Attacks"];

/// Weapon property names and the sheet's property keys.
const PROPERTY_KEYS: [(&str, &str); 11] = [
    ("Ammunition", "amm"),
    ("Finesse", "fin"),
    ("Heavy", "hvy"),
    ("Light", "lgt"),
    ("Loading", "lod"),
    ("Range", "rng"),
    ("Reach", "rch"),
    ("Special", "spc"),
    ("Thrown", "thr"),
    ("Two-Handed", "two"),
    ("Versatile", "ver"),
];

/// Class-feature flags and extra damage for one weapon record.
///
/// Features are bound to a specific weapon through `characterValues`
/// (hex weapon, pact weapon). A pact weapon also picks up the pact
/// invocations chosen in class options.
pub fn weapon_flags(entry: &InventoryEntry, character: &SourceCharacter, index: &ModifierIndex<'_>) -> ItemFlags {
    let mut flags = ItemFlags::default();

    flags.class_features = character
        .character_values
        .iter()
        .filter(|cv| cv.has_value() && cv.targets(entry.id))
        .filter_map(|cv| item_feature_binding(cv.type_id, cv.value_type_id))
        .map(String::from)
        .collect();

    if flags.class_features.iter().any(|f| f == "pactWeapon") {
        let pact_features = character
            .options
            .class
            .iter()
            .map(|option| option.definition.name.as_str())
            .filter(|name| PACT_WEAPON_FEATURES.contains(name))
            .map(String::from);
        flags.class_features.extend(pact_features.collect::<Vec<_>>());
    }

    let bound = |trigger: &Trigger| {
        matches!(trigger, Trigger::ItemFeature(name) if flags.class_features.iter().any(|f| f == *name))
    };
    let bound_parts: Vec<DamagePart> = exceptions_where(bound)
        .filter_map(|exception| match exception {
            Exception::WeaponDamagePart(formula, damage_type) => Some(DamagePart::new(formula, damage_type)),
            _ => None,
        })
        .collect();
    flags.damage.parts.extend(bound_parts);

    if entry.definition.attack_type == Some(MELEE) && entry.definition.item_type.as_deref() != Some("Ammunition") {
        flags.damage.parts.extend(extra_melee_damage(index));
        let chosen = |trigger: &Trigger| {
            matches!(trigger, Trigger::ChosenOption(name) if character.has_chosen_option(name))
        };
        for exception in exceptions_where(chosen) {
            if let Exception::MeleeWeaponFlag(flag) = exception {
                flags.class_features.push(flag.to_string());
            }
        }
    }
    flags
}

/// `damage` effects restricted to melee weapon attacks (Improved Divine
/// Smite and the like).
fn extra_melee_damage(index: &ModifierIndex<'_>) -> Vec<DamagePart> {
    index
        .query("damage")
        .restricted_to(MELEE_WEAPON_ATTACKS)
        .effects()
        .filter_map(|effect| match (effect.dice_string(), effect.value) {
            (Some(dice), _) => Some(DamagePart::new(dice, effect.sub_type.as_str())),
            (None, Some(value)) if value != 0 => Some(DamagePart::new(value.to_string(), effect.sub_type.as_str())),
            _ => None,
        })
        .collect()
}

fn dice_formula(dice: &DiceValue) -> Option<String> {
    if let Some(s) = dice.dice_string.as_deref().filter(|s| !s.is_empty()) {
        return Some(s.to_string());
    }
    match (dice.dice_count, dice.dice_value, dice.fixed_value) {
        (Some(count), Some(value), fixed) => Some(match fixed.filter(|f| *f != 0) {
            Some(f) => format!("{}d{} + {}", count, value, f),
            None => format!("{}d{}", count, value),
        }),
        (_, _, Some(fixed)) => Some(fixed.to_string()),
        _ => None,
    }
}

fn damage_type(def: &ItemDefinition) -> String {
    def.damage_type.as_deref().unwrap_or("").to_lowercase()
}

/// Magic `bonus/magic` granted by the item.
fn magic_bonus(entry: &InventoryEntry) -> i32 {
    entry
        .definition
        .granted_modifiers
        .iter()
        .filter(|m| m.kind == "bonus" && m.sub_type == "magic")
        .map(|m| m.value_or_zero())
        .sum()
}

fn range(def: &ItemDefinition) -> Option<ItemRange> {
    let has_range = def.range.is_some_and(|r| r > 0);
    has_range.then(|| ItemRange {
        value: def.range,
        long: def.long_range.filter(|l| *l > 0),
        units: "ft".to_string(),
    })
}

/// Finesse weapons use the better of STR and DEX; ranged ones use DEX.
fn attack_ability(def: &ItemDefinition, ctx: &ItemContext<'_>) -> Ability {
    let abilities = &ctx.sheet.abilities;
    if def.has_property("Finesse") {
        if abilities.modifier(Ability::Dex) > abilities.modifier(Ability::Str) {
            Ability::Dex
        } else {
            Ability::Str
        }
    } else if def.attack_type == Some(MELEE) {
        Ability::Str
    } else {
        Ability::Dex
    }
}

fn is_proficient(def: &ItemDefinition, ctx: &ItemContext<'_>) -> bool {
    let prof = &ctx.sheet.traits.weapon_prof;
    let category = match def.category_id {
        Some(1) => Some("sim"),
        Some(2) => Some("mar"),
        _ => None,
    };
    category.is_some_and(|c| prof.value.iter().any(|v| v == c))
        || prof.custom.split(';').map(str::trim).any(|name| name == def.name)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WeaponParser;

const WEAPON_ROUTES: &[ItemRoute] = &[ItemRoute::any("Weapon")];

impl ItemParser for WeaponParser {
    fn name(&self) -> &'static str {
        "weapon"
    }

    fn routes(&self) -> &'static [ItemRoute] {
        WEAPON_ROUTES
    }

    fn parse(&self, entry: &InventoryEntry, ctx: &ItemContext<'_>, flags: ItemFlags) -> ParsedItem {
        let def = &entry.definition;
        let melee = def.attack_type == Some(MELEE);
        let mut item = base_item(entry, ItemKind::Weapon);
        item.flags = flags;

        let category = if def.category_id == Some(2) { "martial" } else { "simple" };
        item.data.weapon_type = Some(format!("{}{}", category, if melee { "M" } else { "R" }));
        item.data.properties = PROPERTY_KEYS
            .iter()
            .filter(|(name, _)| def.has_property(name))
            .map(|(_, key)| key.to_string())
            .collect();
        item.data.action_type = Some(if melee { "mwak" } else { "rwak" }.to_string());
        item.data.ability = Some(attack_ability(def, ctx).key().to_string());
        item.data.range = range(def);
        item.data.proficient = is_proficient(def, ctx);

        let bonus = magic_bonus(entry);
        item.data.attack_bonus = bonus;
        if let Some(formula) = def.damage.as_ref().and_then(dice_formula) {
            let formula = match bonus {
                0 => format!("{} + @mod", formula),
                b => format!("{} + @mod + {}", formula, b),
            };
            item.data.damage.parts.push(DamagePart::new(formula, damage_type(def)));
        }
        if let Some(versatile) = def
            .properties
            .iter()
            .find(|p| p.name == "Versatile")
            .and_then(|p| p.notes.as_deref())
            .filter(|n| !n.is_empty())
        {
            item.data.damage.versatile = format!("{} + @mod", versatile.trim());
        }
        item
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AmmunitionParser;

const AMMUNITION_ROUTES: &[ItemRoute] = &[ItemRoute::with_type("Weapon", "Ammunition")];

impl ItemParser for AmmunitionParser {
    fn name(&self) -> &'static str {
        "ammunition"
    }

    fn routes(&self) -> &'static [ItemRoute] {
        AMMUNITION_ROUTES
    }

    fn parse(&self, entry: &InventoryEntry, _ctx: &ItemContext<'_>, _flags: ItemFlags) -> ParsedItem {
        let def = &entry.definition;
        let mut item = base_item(entry, ItemKind::Consumable);
        item.data.consumable_type = Some("ammo".to_string());
        item.data.attack_bonus = magic_bonus(entry);
        if let Some(formula) = def.damage.as_ref().and_then(dice_formula) {
            item.data.damage.parts.push(DamagePart::new(formula, damage_type(def)));
        }
        item
    }
}
