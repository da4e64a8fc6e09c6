//! Inventory classification.
//!
//! Every inventory record is routed by its `filterType` (and, for a few
//! filter types, its `type` or `subType`) to an [`ItemParser`]. Records
//! without a filter type are homebrew and go to the custom parser. Parsed
//! items are then given magic-item flags when they carry charges or spells.

pub mod armor;
mod consumable;
mod custom_values;
mod gear;
mod loot;
mod magic;
mod tool;
mod weapon;

pub use armor::{ArmorCandidate, ArmorParser};
pub use consumable::{PotionParser, ScrollParser};
pub use custom_values::apply_custom_values;
pub use gear::{StaffParser, WondrousParser};
pub use loot::{CustomItemParser, LootParser};
pub use magic::magic_item_flags;
pub use tool::ToolParser;
pub use weapon::{weapon_flags, AmmunitionParser, WeaponParser};

use std::borrow::Cow;
use std::sync::Arc;

use charsheet_domain::sheet::{ItemData, ItemFlags};
use charsheet_domain::source::{CustomItem, ItemDefinition};
use charsheet_domain::{
    DerivedCharacter, ImportSettings, InventoryEntry, ItemKind, ParsedItem, SourceCharacter,
};

use crate::diagnostics::{DiagnosticSink, CATEGORY_CHARACTER};
use crate::modifier_index::ModifierIndex;

/// What a parser may read besides the record itself: the source character
/// and the sheet as resolved so far (abilities, proficiencies).
pub struct ItemContext<'c> {
    pub character: &'c SourceCharacter,
    pub sheet: &'c DerivedCharacter,
    pub index: &'c ModifierIndex<'c>,
}

/// Which records a parser accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRoute {
    pub filter_type: &'static str,
    pub discriminator: Discriminator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discriminator {
    /// Every record of the filter type not claimed by a narrower route.
    Any,
    /// Records whose definition `type` matches.
    Type(&'static str),
    /// Records whose definition `subType` matches.
    SubType(&'static str),
}

impl ItemRoute {
    pub const fn any(filter_type: &'static str) -> Self {
        Self {
            filter_type,
            discriminator: Discriminator::Any,
        }
    }

    pub const fn with_type(filter_type: &'static str, item_type: &'static str) -> Self {
        Self {
            filter_type,
            discriminator: Discriminator::Type(item_type),
        }
    }

    pub const fn with_sub_type(filter_type: &'static str, sub_type: &'static str) -> Self {
        Self {
            filter_type,
            discriminator: Discriminator::SubType(sub_type),
        }
    }

    fn is_narrow(&self) -> bool {
        self.discriminator != Discriminator::Any
    }

    fn accepts(&self, definition: &ItemDefinition) -> bool {
        if definition.filter_type.as_deref() != Some(self.filter_type) {
            return false;
        }
        match self.discriminator {
            Discriminator::Any => true,
            Discriminator::Type(t) => definition.item_type.as_deref() == Some(t),
            Discriminator::SubType(s) => definition.sub_type.as_deref() == Some(s),
        }
    }
}

/// Turns one inventory record into a sheet item.
pub trait ItemParser: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn routes(&self) -> &'static [ItemRoute];

    /// `flags` carries what the dispatcher already worked out for the
    /// record (weapon feature flags); parsers that have none to add return
    /// them unchanged on the item.
    fn parse(&self, entry: &InventoryEntry, ctx: &ItemContext<'_>, flags: ItemFlags) -> ParsedItem;
}

/// Registry of item parsers.
pub struct ItemParserRegistry {
    parsers: Vec<Arc<dyn ItemParser>>,
    custom: Arc<dyn ItemParser>,
}

impl Default for ItemParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemParserRegistry {
    /// Create a registry with all built-in parsers.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(WeaponParser));
        registry.register(Arc::new(AmmunitionParser));
        registry.register(Arc::new(ArmorParser));
        registry.register(Arc::new(WondrousParser));
        registry.register(Arc::new(StaffParser));
        registry.register(Arc::new(PotionParser));
        registry.register(Arc::new(ScrollParser));
        registry.register(Arc::new(ToolParser));
        registry.register(Arc::new(LootParser));
        registry
    }

    /// Create a registry that only knows homebrew items.
    pub fn empty() -> Self {
        Self {
            parsers: Vec::new(),
            custom: Arc::new(CustomItemParser),
        }
    }

    pub fn register(&mut self, parser: Arc<dyn ItemParser>) {
        self.parsers.push(parser);
    }

    /// Parser for a record: a narrow route (by type or subtype) wins over a
    /// filter-type-wide one. Records without a filter type get the custom
    /// parser; `None` means the filter type is unknown.
    pub fn get(&self, definition: &ItemDefinition) -> Option<Arc<dyn ItemParser>> {
        if definition.filter_type.is_none() {
            return Some(Arc::clone(&self.custom));
        }
        let matching = |narrow: bool| {
            self.parsers
                .iter()
                .find(|p| p.routes().iter().any(|r| r.is_narrow() == narrow && r.accepts(definition)))
                .cloned()
        };
        matching(true).or_else(|| matching(false))
    }

    /// List every filter type some parser accepts.
    pub fn filter_types(&self) -> Vec<&'static str> {
        let mut types: Vec<&'static str> = Vec::new();
        for route in self.parsers.iter().flat_map(|p| p.routes()) {
            if !types.contains(&route.filter_type) {
                types.push(route.filter_type);
            }
        }
        types
    }
}

/// Parse the character's inventory, then its homebrew items.
pub fn classify_inventory(
    ctx: &ItemContext<'_>,
    registry: &ItemParserRegistry,
    settings: &ImportSettings,
    diagnostics: &dyn DiagnosticSink,
) -> Vec<ParsedItem> {
    let character = ctx.character;
    let inventory: Cow<'_, [InventoryEntry]> = if settings.apply_custom_values {
        Cow::Owned(apply_custom_values(&character.inventory, &character.character_values))
    } else {
        Cow::Borrowed(&character.inventory)
    };

    let custom_entries: Vec<InventoryEntry> = if settings.import_custom_items {
        character.custom_items.iter().map(custom_entry).collect()
    } else {
        Vec::new()
    };

    let items: Vec<ParsedItem> = inventory
        .iter()
        .chain(&custom_entries)
        .map(|entry| classify_entry(entry, ctx, registry, diagnostics))
        .collect();

    tracing::debug!(
        character = %character.name,
        inventory = inventory.len(),
        custom = custom_entries.len(),
        unknown = items.iter().filter(|i| i.is_empty()).count(),
        "Classified inventory"
    );
    items
}

/// Parse one record. Unknown filter types yield an empty item and a
/// diagnostic.
pub fn classify_entry(
    entry: &InventoryEntry,
    ctx: &ItemContext<'_>,
    registry: &ItemParserRegistry,
    diagnostics: &dyn DiagnosticSink,
) -> ParsedItem {
    let definition = &entry.definition;
    let Some(parser) = registry.get(definition) else {
        diagnostics.report(
            CATEGORY_CHARACTER,
            &format!(
                "Unknown item: {}, {}/{}",
                definition.name,
                definition.item_type.as_deref().unwrap_or("undefined"),
                definition.filter_type.as_deref().unwrap_or("undefined"),
            ),
        );
        return ParsedItem::default();
    };

    let flags = if definition.filter_type.as_deref() == Some("Weapon") {
        weapon_flags(entry, ctx.character, ctx.index)
    } else {
        ItemFlags::default()
    };

    let mut item = parser.parse(entry, ctx, flags);
    item.flags.magic_items = magic_item_flags(entry, &ctx.character.spells.item);
    tracing::trace!(item = %item.name, parser = parser.name(), "Parsed item");
    item
}

/// Homebrew items are parsed like inventory records without a filter type.
fn custom_entry(custom: &CustomItem) -> InventoryEntry {
    InventoryEntry {
        id: custom.id,
        quantity: custom.quantity,
        definition: ItemDefinition {
            id: custom.id,
            name: custom.name.clone(),
            description: match (&custom.description, &custom.notes) {
                (Some(d), Some(n)) if !n.is_empty() => Some(format!("{}<p>{}</p>", d, n)),
                (None, Some(n)) => Some(format!("<p>{}</p>", n)),
                (d, _) => d.clone(),
            },
            weight: custom.weight,
            cost: custom.cost,
            ..ItemDefinition::default()
        },
        ..InventoryEntry::default()
    }
}

/// Fields every parser fills the same way.
pub(crate) fn base_item(entry: &InventoryEntry, kind: ItemKind) -> ParsedItem {
    let def = &entry.definition;
    let attunement = match (def.can_attune, entry.is_attuned) {
        (false, _) => 0,
        (true, false) => 1,
        (true, true) => 2,
    };
    let mut item = ParsedItem::new(def.name.clone(), kind);
    item.data = ItemData {
        description: def.description.clone().unwrap_or_default(),
        quantity: entry.quantity(),
        weight: def.weight.unwrap_or(0.0),
        price: def.cost.unwrap_or(0.0),
        equipped: entry.equipped,
        attuned: entry.is_attuned,
        attunement,
        rarity: def.rarity.clone().unwrap_or_default(),
        identified: true,
        ..ItemData::default()
    };
    item
}
