//! Wondrous items, rings, wands, rods and staves.

use charsheet_domain::sheet::{ArmorValue, DamagePart, ItemFlags, ItemUses};
use charsheet_domain::source::LimitedUse;
use charsheet_domain::{InventoryEntry, ItemKind, ParsedItem};

use super::armor::magic_armor_bonus;
use super::{base_item, ItemContext, ItemParser, ItemRoute};

/// Charges as item uses. Reset types: 1 short rest, 2 long rest, 3 dawn.
pub(crate) fn charges(limited_use: Option<&LimitedUse>) -> Option<ItemUses> {
    let limited_use = limited_use.filter(|l| l.max() > 0)?;
    Some(ItemUses {
        value: limited_use.max() - limited_use.used(),
        max: limited_use.max(),
        per: reset_key(limited_use.reset_type).unwrap_or("charges").to_string(),
    })
}

/// Sheet key for an export reset type.
pub(crate) fn reset_key(reset_type: Option<u8>) -> Option<&'static str> {
    match reset_type? {
        1 => Some("sr"),
        2 => Some("lr"),
        3 => Some("day"),
        _ => None,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WondrousParser;

const WONDROUS_ROUTES: &[ItemRoute] = &[
    ItemRoute::any("Wondrous item"),
    ItemRoute::any("Ring"),
    ItemRoute::any("Wand"),
    ItemRoute::any("Rod"),
];

impl ItemParser for WondrousParser {
    fn name(&self) -> &'static str {
        "wondrous"
    }

    fn routes(&self) -> &'static [ItemRoute] {
        WONDROUS_ROUTES
    }

    fn parse(&self, entry: &InventoryEntry, _ctx: &ItemContext<'_>, flags: ItemFlags) -> ParsedItem {
        let mut item = base_item(entry, ItemKind::Equipment);
        item.flags = flags;
        // Only worn protection (rings, cloaks, bracers) carries an armor value.
        let ac_bonus = entry
            .definition
            .granted_modifiers
            .iter()
            .any(|m| m.kind == "bonus" && m.sub_type == "armor-class");
        if ac_bonus {
            item.data.armor = Some(ArmorValue {
                value: magic_armor_bonus(entry),
                kind: "trinket".to_string(),
                dex: None,
            });
        }
        item.data.uses = charges(entry.limited_use.as_ref());
        item
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StaffParser;

const STAFF_ROUTES: &[ItemRoute] = &[ItemRoute::any("Staff")];

impl ItemParser for StaffParser {
    fn name(&self) -> &'static str {
        "staff"
    }

    fn routes(&self) -> &'static [ItemRoute] {
        STAFF_ROUTES
    }

    /// Staves double as quarterstaves.
    fn parse(&self, entry: &InventoryEntry, _ctx: &ItemContext<'_>, flags: ItemFlags) -> ParsedItem {
        let mut item = base_item(entry, ItemKind::Weapon);
        item.flags = flags;
        item.data.weapon_type = Some("simpleM".to_string());
        item.data.properties = vec!["ver".to_string()];
        item.data.action_type = Some("mwak".to_string());
        item.data.ability = Some("str".to_string());
        item.data.proficient = true;
        item.data.damage.parts.push(DamagePart::new("1d6 + @mod", "bludgeoning"));
        item.data.damage.versatile = "1d8 + @mod".to_string();
        item.data.uses = charges(entry.limited_use.as_ref());
        item
    }
}
