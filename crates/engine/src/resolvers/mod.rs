//! Field resolvers.
//!
//! Each resolver computes one part of the sheet from the source character
//! and, where it needs them, fields resolved earlier (abilities feed almost
//! everything; proficiency feeds skills and spell DC). Resolvers return
//! `Result` and never touch the sheet themselves; the assembler decides
//! what to do with a failure.

pub mod abilities;
pub mod bonuses;
pub mod defense;
pub mod details;
pub mod features;
pub mod proficiency;
pub mod resources;
pub mod spells;
pub mod vitals;

use charsheet_domain::{ImportSettings, InventoryEntry, SourceCharacter};

use crate::diagnostics::DiagnosticSink;
use crate::modifier_index::ModifierIndex;

/// Everything a resolver reads, borrowed from one derivation.
pub struct DerivationContext<'a> {
    pub character: &'a SourceCharacter,
    pub index: ModifierIndex<'a>,
    pub settings: &'a ImportSettings,
    pub diagnostics: &'a dyn DiagnosticSink,
}

impl<'a> DerivationContext<'a> {
    pub fn new(
        character: &'a SourceCharacter,
        settings: &'a ImportSettings,
        diagnostics: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            character,
            index: ModifierIndex::build(character),
            settings,
            diagnostics,
        }
    }

    pub fn total_level(&self) -> i32 {
        self.character.total_level()
    }

    pub fn equipped(&self) -> impl Iterator<Item = &'a InventoryEntry> {
        self.character.inventory.iter().filter(|entry| entry.equipped)
    }

    /// Any equipped armor or shield.
    pub fn wears_armor(&self) -> bool {
        self.equipped()
            .any(|entry| entry.definition.filter_type.as_deref() == Some("Armor"))
    }

    pub fn wears_heavy_armor(&self) -> bool {
        self.equipped()
            .any(|entry| entry.definition.item_type.as_deref() == Some("Heavy Armor"))
    }

    pub fn report(&self, category: &str, message: &str) {
        self.diagnostics.report(category, message);
    }
}
