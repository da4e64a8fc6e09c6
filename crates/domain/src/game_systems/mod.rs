//! D&D 5e rules used by the sheet derivation.
//!
//! - `dnd5e` - rule math and the multiclass spell slot table
//! - `dictionary` - name/id lookup tables for the export format
//! - `exceptions` - named races/features/feats with special handling

pub mod dictionary;
mod dnd5e;
pub mod exceptions;

pub use dnd5e::{
    ability_modifier, multiclass_spell_slots, proficiency_bonus, xp_bounds, MAX_LEVEL,
    MULTICLASS_SPELL_SLOTS,
};
pub use exceptions::{exceptions_where, race_armor_exception, Exception, Trigger};
