//! Potions and scrolls.

use std::sync::OnceLock;

use charsheet_domain::sheet::{DamagePart, ItemFlags, ItemUses};
use charsheet_domain::{InventoryEntry, ItemKind, ParsedItem};

use super::{base_item, ItemContext, ItemParser, ItemRoute};

static DICE_REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();

/// First dice expression in item text, e.g. `"4d4 + 4"` from
/// "You regain 4d4 + 4 hit points".
fn first_dice_expression(text: &str) -> Option<String> {
    let re = DICE_REGEX.get_or_init(|| {
        regex_lite::Regex::new(r"(\d+d\d+)(?:\s*\+\s*(\d+))?").expect("DICE_REGEX pattern is invalid")
    });
    let caps = re.captures(text)?;
    let dice = caps.get(1)?.as_str();
    Some(match caps.get(2) {
        Some(flat) => format!("{} + {}", dice, flat.as_str()),
        None => dice.to_string(),
    })
}

fn single_use() -> ItemUses {
    ItemUses {
        value: 1,
        max: 1,
        per: "charges".to_string(),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PotionParser;

const POTION_ROUTES: &[ItemRoute] = &[
    ItemRoute::any("Potion"),
    ItemRoute::with_sub_type("Other Gear", "Potion"),
];

impl ItemParser for PotionParser {
    fn name(&self) -> &'static str {
        "potion"
    }

    fn routes(&self) -> &'static [ItemRoute] {
        POTION_ROUTES
    }

    fn parse(&self, entry: &InventoryEntry, _ctx: &ItemContext<'_>, flags: ItemFlags) -> ParsedItem {
        let mut item = base_item(entry, ItemKind::Consumable);
        item.flags = flags;
        item.data.consumable_type = Some("potion".to_string());
        item.data.uses = Some(single_use());

        let description = entry.definition.description.as_deref().unwrap_or("");
        let heals = description.contains("regain") && description.contains("hit points");
        match first_dice_expression(description) {
            Some(formula) if heals => {
                item.data.action_type = Some("heal".to_string());
                item.data.damage.parts.push(DamagePart::new(formula, "healing"));
            }
            _ => item.data.action_type = Some("other".to_string()),
        }
        item
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ScrollParser;

const SCROLL_ROUTES: &[ItemRoute] = &[ItemRoute::any("Scroll")];

impl ItemParser for ScrollParser {
    fn name(&self) -> &'static str {
        "scroll"
    }

    fn routes(&self) -> &'static [ItemRoute] {
        SCROLL_ROUTES
    }

    fn parse(&self, entry: &InventoryEntry, _ctx: &ItemContext<'_>, flags: ItemFlags) -> ParsedItem {
        let mut item = base_item(entry, ItemKind::Consumable);
        item.flags = flags;
        item.data.consumable_type = Some("scroll".to_string());
        item.data.uses = Some(single_use());
        item
    }
}
