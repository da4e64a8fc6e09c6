//! Value objects - Immutable objects defined by their attributes

mod ability;
mod armor;
mod bonus;
mod proficiency;
mod settings;

pub use ability::Ability;
pub use armor::ArmorType;
pub use bonus::{serialize_blank_when_zero, BonusExpr};
pub use proficiency::{ProficiencyLevel, Rounding};
pub use settings::ImportSettings;
