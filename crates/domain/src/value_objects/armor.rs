//! Armor type value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Armor category as used by the armor class formulas.
///
/// The first four come from the export (`armorTypeId` 1..4 or the item's
/// `type` label); the others are synthesized for unarmored candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmorType {
    LightArmor,
    MediumArmor,
    HeavyArmor,
    Shield,
    NaturalArmor,
    UnarmoredDefense,
    Unarmored,
    Other(String),
}

impl ArmorType {
    pub fn from_type_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::LightArmor),
            2 => Some(Self::MediumArmor),
            3 => Some(Self::HeavyArmor),
            4 => Some(Self::Shield),
            _ => None,
        }
    }

    pub fn type_id(&self) -> Option<u8> {
        match self {
            Self::LightArmor => Some(1),
            Self::MediumArmor => Some(2),
            Self::HeavyArmor => Some(3),
            Self::Shield => Some(4),
            _ => None,
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label {
            "Light Armor" => Self::LightArmor,
            "Medium Armor" => Self::MediumArmor,
            "Heavy Armor" => Self::HeavyArmor,
            "Shield" => Self::Shield,
            "Natural Armor" => Self::NaturalArmor,
            "Unarmored Defense" => Self::UnarmoredDefense,
            "Unarmored" => Self::Unarmored,
            other => Self::Other(other.to_string()),
        }
    }

    /// Resolve from an item's label, falling back to its type id.
    pub fn from_item(label: Option<&str>, type_id: Option<u8>) -> Self {
        match label.map(Self::from_label) {
            Some(Self::Other(other)) => {
                type_id.and_then(Self::from_type_id).unwrap_or(Self::Other(other))
            }
            Some(kind) => kind,
            None => type_id
                .and_then(Self::from_type_id)
                .unwrap_or_else(|| Self::Other(String::new())),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::LightArmor => "Light Armor",
            Self::MediumArmor => "Medium Armor",
            Self::HeavyArmor => "Heavy Armor",
            Self::Shield => "Shield",
            Self::NaturalArmor => "Natural Armor",
            Self::UnarmoredDefense => "Unarmored Defense",
            Self::Unarmored => "Unarmored",
            Self::Other(label) => label,
        }
    }

    /// Key the sheet uses for an armor item's `armor.type`.
    pub fn sheet_key(&self) -> &'static str {
        match self {
            Self::LightArmor => "light",
            Self::MediumArmor => "medium",
            Self::HeavyArmor => "heavy",
            Self::Shield => "shield",
            Self::NaturalArmor => "natural",
            _ => "bonus",
        }
    }

    /// Cap on the DEX modifier added to AC, `None` meaning uncapped.
    pub fn dex_cap(&self) -> Option<i32> {
        match self {
            Self::MediumArmor => Some(2),
            Self::HeavyArmor | Self::Shield => Some(0),
            _ => None,
        }
    }
}

impl fmt::Display for ArmorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_from_label_or_id() {
        assert_eq!(ArmorType::from_item(Some("Heavy Armor"), None), ArmorType::HeavyArmor);
        assert_eq!(ArmorType::from_item(Some("Odd"), Some(4)), ArmorType::Shield);
        assert_eq!(ArmorType::from_item(None, Some(2)), ArmorType::MediumArmor);
        assert_eq!(
            ArmorType::from_item(Some("Odd"), None),
            ArmorType::Other("Odd".to_string())
        );
    }

    #[test]
    fn type_ids_match_export() {
        assert_eq!(ArmorType::Shield.type_id(), Some(4));
        assert_eq!(ArmorType::from_type_id(1), Some(ArmorType::LightArmor));
        assert_eq!(ArmorType::NaturalArmor.type_id(), None);
    }

    #[test]
    fn dex_caps() {
        assert_eq!(ArmorType::LightArmor.dex_cap(), None);
        assert_eq!(ArmorType::MediumArmor.dex_cap(), Some(2));
        assert_eq!(ArmorType::HeavyArmor.dex_cap(), Some(0));
    }
}
