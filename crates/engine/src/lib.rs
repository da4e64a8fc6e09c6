//! Charsheet Engine library.
//!
//! Derives a computed character sheet from a character-builder export.
//!
//! ## Structure
//!
//! - `document` - Reading exports and unwrapping their envelopes
//! - `modifier_index` - Query and sum primitive over rule effects
//! - `resolvers/` - One resolver per sheet area (abilities, defense, vitals, ...)
//! - `items/` - Inventory classification through a parser registry
//! - `assembler` - Runs the resolvers in order and isolates failures
//! - `config` - Environment configuration for the binary

pub mod assembler;
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod items;
pub mod modifier_index;
pub mod resolvers;
pub mod template;

/// Test fixtures module for unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use assembler::CharacterAssembler;
pub use config::EngineConfig;
pub use error::{DeriveError, ImportError};
