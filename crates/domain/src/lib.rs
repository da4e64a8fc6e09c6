//! Charsheet domain.
//!
//! - `source` - serde mirrors of the character-builder export
//! - `sheet` - the derived character sheet handed to the tabletop host
//! - `game_systems` - D&D 5e rule math, lookup tables and named exceptions
//! - `value_objects` - abilities, bonus expressions, proficiency, armor types, settings

pub mod error;
pub mod game_systems;
pub mod sheet;
pub mod source;
pub mod value_objects;

pub use error::DomainError;

pub use value_objects::{
    Ability, ArmorType, BonusExpr, ImportSettings, ProficiencyLevel, Rounding,
};

pub use sheet::{
    Abilities, AbilityScore, DerivedCharacter, ItemKind, ParsedItem,
};

pub use source::{CharacterDocument, InventoryEntry, RuleEffect, SourceCharacter};
