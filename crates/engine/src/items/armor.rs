//! Armor items and their armor class contribution.

use charsheet_domain::sheet::{ArmorValue, ItemFlags};
use charsheet_domain::{ArmorType, InventoryEntry, ItemKind, ParsedItem};

use super::{base_item, ItemContext, ItemParser, ItemRoute};

/// Flat armor class printed on the item.
pub fn armor_class(entry: &InventoryEntry) -> i32 {
    entry.definition.armor_class.unwrap_or(0)
}

/// `bonus/armor-class` granted by the item, when its magic is available.
pub fn magic_armor_bonus(entry: &InventoryEntry) -> i32 {
    if !entry.effects_available() {
        return 0;
    }
    entry
        .definition
        .granted_modifiers
        .iter()
        .filter(|m| m.kind == "bonus" && m.sub_type == "armor-class")
        .map(|m| m.value_or_zero())
        .sum()
}

/// Armor class an equipped item adds on its own.
pub fn equipped_armor_class(entry: &InventoryEntry) -> i32 {
    armor_class(entry) + magic_armor_bonus(entry)
}

/// One armor (or shield) option for the armor class computation, either
/// worn or synthesized from an unarmored rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmorCandidate {
    pub name: String,
    pub kind: ArmorType,
    /// Printed armor class plus available magic bonus.
    pub armor_class: i32,
}

impl ArmorCandidate {
    pub fn from_entry(entry: &InventoryEntry) -> Self {
        let def = &entry.definition;
        let kind = if def.is_shield() {
            ArmorType::Shield
        } else {
            ArmorType::from_item(def.item_type.as_deref(), def.armor_type_id)
        };
        Self {
            name: def.name.clone(),
            kind,
            armor_class: equipped_armor_class(entry),
        }
    }

    /// A candidate with no item behind it ("Unarmored", "Natural Armor").
    pub fn synthetic(kind: ArmorType, armor_class: i32) -> Self {
        Self {
            name: kind.label().to_string(),
            kind,
            armor_class,
        }
    }

    pub fn is_shield(&self) -> bool {
        self.kind == ArmorType::Shield
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ArmorParser;

const ARMOR_ROUTES: &[ItemRoute] = &[ItemRoute::any("Armor")];

impl ItemParser for ArmorParser {
    fn name(&self) -> &'static str {
        "armor"
    }

    fn routes(&self) -> &'static [ItemRoute] {
        ARMOR_ROUTES
    }

    fn parse(&self, entry: &InventoryEntry, ctx: &ItemContext<'_>, flags: ItemFlags) -> ParsedItem {
        let def = &entry.definition;
        let candidate = ArmorCandidate::from_entry(entry);
        let mut item = base_item(entry, ItemKind::Equipment);
        item.flags = flags;
        item.data.armor = Some(ArmorValue {
            value: candidate.armor_class,
            kind: candidate.kind.sheet_key().to_string(),
            dex: candidate.kind.dex_cap(),
        });
        item.data.strength = def.strength_requirement.filter(|s| *s > 0);
        item.data.stealth = def.stealth_check == Some(2);
        item.data.proficient = is_proficient(&candidate.kind, &ctx.sheet.traits.armor_prof.value);
        item
    }
}

fn is_proficient(kind: &ArmorType, armor_prof: &[String]) -> bool {
    let key = match kind {
        ArmorType::LightArmor => "lgt",
        ArmorType::MediumArmor => "med",
        ArmorType::HeavyArmor => "hvy",
        ArmorType::Shield => "shl",
        _ => return true,
    };
    armor_prof.iter().any(|p| p == key)
}
