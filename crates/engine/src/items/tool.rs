//! Tools (`Other Gear` with subtype `Tool`).

use charsheet_domain::game_systems::dictionary::TOOL_PROFICIENCIES;
use charsheet_domain::sheet::ItemFlags;
use charsheet_domain::{InventoryEntry, ItemKind, ParsedItem};

use super::{base_item, ItemContext, ItemParser, ItemRoute};

#[derive(Debug, Default, Clone, Copy)]
pub struct ToolParser;

const TOOL_ROUTES: &[ItemRoute] = &[ItemRoute::with_sub_type("Other Gear", "Tool")];

impl ItemParser for ToolParser {
    fn name(&self) -> &'static str {
        "tool"
    }

    fn routes(&self) -> &'static [ItemRoute] {
        TOOL_ROUTES
    }

    fn parse(&self, entry: &InventoryEntry, ctx: &ItemContext<'_>, flags: ItemFlags) -> ParsedItem {
        let name = entry.definition.name.as_str();
        let mut item = base_item(entry, ItemKind::Tool);
        item.flags = flags;

        let key = TOOL_PROFICIENCIES
            .iter()
            .find(|(label, _)| *label == name)
            .map(|(_, key)| *key);
        let prof = &ctx.sheet.traits.tool_prof;
        item.data.proficient = key.is_some_and(|k| prof.value.iter().any(|v| v == k))
            || prof.custom.split(';').map(str::trim).any(|c| c == name);
        item.data.tool_type = key.map(String::from);
        item.data.ability = Some("int".to_string());
        item
    }
}
