//! Loot and homebrew items.

use charsheet_domain::sheet::ItemFlags;
use charsheet_domain::{InventoryEntry, ItemKind, ParsedItem};

use super::{base_item, ItemContext, ItemParser, ItemRoute};

/// Everything under `Other Gear` that is neither a potion nor a tool.
#[derive(Debug, Default, Clone, Copy)]
pub struct LootParser;

const LOOT_ROUTES: &[ItemRoute] = &[ItemRoute::any("Other Gear")];

impl ItemParser for LootParser {
    fn name(&self) -> &'static str {
        "loot"
    }

    fn routes(&self) -> &'static [ItemRoute] {
        LOOT_ROUTES
    }

    fn parse(&self, entry: &InventoryEntry, _ctx: &ItemContext<'_>, flags: ItemFlags) -> ParsedItem {
        let mut item = base_item(entry, ItemKind::Loot);
        item.flags = flags;
        item
    }
}

/// Records without a filter type. Homebrew items have no rules data, so
/// only the bookkeeping fields survive.
#[derive(Debug, Default, Clone, Copy)]
pub struct CustomItemParser;

impl ItemParser for CustomItemParser {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn routes(&self) -> &'static [ItemRoute] {
        &[]
    }

    fn parse(&self, entry: &InventoryEntry, _ctx: &ItemContext<'_>, flags: ItemFlags) -> ParsedItem {
        let mut item = base_item(entry, ItemKind::Loot);
        item.flags = flags;
        item.data.rarity = String::new();
        item.data.attunement = 0;
        item
    }
}
