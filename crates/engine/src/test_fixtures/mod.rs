//! Test fixtures loader for JSON fixture files and common test helpers.
//!
//! Fixtures live in `test_data/`. Small synthetic characters are built with
//! [`CharacterBuilder`], which assembles the export JSON with `json!` and
//! runs it through the real deserializers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{characters, effect, CharacterBuilder};
//!
//! #[test]
//! fn test_monk_is_fast() {
//!     let monk = characters::monk_5();
//!     // ... test logic
//! }
//! ```

use std::path::PathBuf;

use charsheet_domain::{CharacterDocument, SourceCharacter};
use serde_json::{json, Value};

// =============================================================================
// Fixture Loading
// =============================================================================

/// Load a JSON fixture from test_data/ directory.
///
/// # Panics
///
/// Panics if the fixture file cannot be read or parsed.
pub fn load_fixture<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let fixture_path = fixture_path(path);
    let content = std::fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture '{}': {}",
            fixture_path.display(),
            e
        )
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        panic!(
            "Failed to parse fixture '{}': {}",
            fixture_path.display(),
            e
        )
    })
}

/// Load a fixture and return Option instead of panicking.
pub fn try_load_fixture<T: serde::de::DeserializeOwned>(path: &str) -> Option<T> {
    let content = std::fs::read_to_string(fixture_path(path)).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn fixture_path(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(path)
}

// =============================================================================
// Character Fixtures
// =============================================================================

/// Pre-built character fixtures for testing.
pub mod characters {
    use super::*;

    /// Load the Warlock 5 / Fighter 1 multiclass (Sable Vantreth).
    ///
    /// - Race: Variant Human, feat Alert
    /// - Pact of the Blade, Lifedrinker, longsword bound as pact weapon
    /// - Chain mail + shield, Ring of Protection (attuned)
    pub fn warlock_fighter() -> SourceCharacter {
        load_fixture::<CharacterDocument>("characters/warlock5_fighter1.json").character
    }

    /// Load the Level 5 Monk (Brother Oriel).
    ///
    /// - Race: Wood Elf
    /// - No armor, Unarmored Defense (WIS) and Unarmored Movement
    /// - Darkvision 60 ft, Ring of Protection not attuned
    pub fn monk_5() -> SourceCharacter {
        load_fixture::<CharacterDocument>("characters/monk5.json").character
    }
}

// =============================================================================
// Synthetic Characters
// =============================================================================

/// Builds an export document piece by piece.
///
/// Starts from a level-1-free character with every stat at 10.
pub struct CharacterBuilder {
    doc: Value,
}

impl CharacterBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            doc: json!({
                "name": name,
                "stats": (1..=6).map(|id| json!({ "id": id, "value": 10 })).collect::<Vec<_>>(),
                "bonusStats": [],
                "overrideStats": [],
                "modifiers": { "class": [], "race": [], "background": [], "feat": [] },
                "classes": [],
                "inventory": [],
                "race": { "fullName": "Human", "baseName": "Human", "size": "Medium",
                          "weightSpeeds": { "normal": { "walk": 30 } } },
            }),
        }
    }

    /// Base scores in STR, DEX, CON, INT, WIS, CHA order.
    pub fn stats(mut self, scores: [i32; 6]) -> Self {
        self.doc["stats"] = scores
            .iter()
            .enumerate()
            .map(|(i, v)| json!({ "id": i + 1, "value": v }))
            .collect();
        self
    }

    /// Add a modifier under `class`, `race`, `background` or `feat`.
    pub fn modifier(mut self, group: &str, effect: Value) -> Self {
        push(&mut self.doc["modifiers"][group], effect);
        self
    }

    pub fn class(mut self, class: Value) -> Self {
        push(&mut self.doc["classes"], class);
        self
    }

    pub fn item(mut self, entry: Value) -> Self {
        push(&mut self.doc["inventory"], entry);
        self
    }

    /// Set any top-level field of the character record.
    pub fn set(mut self, key: &str, value: Value) -> Self {
        self.doc[key] = value;
        self
    }

    /// Append to a top-level array field, creating it when absent.
    pub fn push(mut self, key: &str, value: Value) -> Self {
        push(&mut self.doc[key], value);
        self
    }

    pub fn json(&self) -> &Value {
        &self.doc
    }

    pub fn build(self) -> SourceCharacter {
        serde_json::from_value(self.doc).unwrap_or_else(|e| panic!("Invalid synthetic character: {}", e))
    }
}

fn push(target: &mut Value, value: Value) {
    match target {
        Value::Array(items) => items.push(value),
        other => *other = Value::Array(vec![value]),
    }
}

/// A granted, unrestricted modifier with a flat value.
pub fn effect(kind: &str, sub_type: &str, value: i32) -> Value {
    json!({
        "type": kind,
        "subType": sub_type,
        "value": value,
        "restriction": "",
        "isGranted": true,
        "friendlyTypeName": title_case(kind),
        "friendlySubtypeName": title_case(sub_type),
    })
}

/// A modifier worth an ability's modifier (`statId` 1..6).
pub fn stat_effect(kind: &str, sub_type: &str, stat_id: u8) -> Value {
    let mut e = effect(kind, sub_type, 0);
    e["value"] = Value::Null;
    e["statId"] = json!(stat_id);
    e
}

/// A modifier worth a dice expression.
pub fn dice_effect(kind: &str, sub_type: &str, dice: &str) -> Value {
    let mut e = effect(kind, sub_type, 0);
    e["value"] = Value::Null;
    e["dice"] = json!({ "diceString": dice });
    e
}

pub fn restricted(mut effect: Value, restriction: &str) -> Value {
    effect["restriction"] = json!(restriction);
    effect
}

/// A proficiency effect, named the way the exporter names it.
pub fn proficiency(sub_type: &str, friendly: &str) -> Value {
    let mut e = effect("proficiency", sub_type, 0);
    e["value"] = Value::Null;
    e["friendlySubtypeName"] = json!(friendly);
    e
}

/// A class entry; `rules` is the definition's `spellRules` (or `null`).
pub fn class(id: i64, name: &str, level: i32, rules: Value) -> Value {
    json!({
        "id": id,
        "level": level,
        "hitDiceUsed": 0,
        "isStartingClass": id == 1,
        "definition": {
            "id": id * 100,
            "name": name,
            "canCastSpells": !rules.is_null(),
            "spellRules": rules,
            "classFeatures": [],
        },
        "classFeatures": [],
    })
}

/// Spell rules with the same slot row at every class level.
pub fn spell_rules(divisor: i32, cantrips: i32, row: &[i32]) -> Value {
    json!({
        "multiClassSpellSlotDivisor": divisor,
        "levelCantripsKnownMaxes": vec![cantrips; 21],
        "levelSpellSlots": vec![row.to_vec(); 21],
    })
}

/// An equipped armor entry. `armor_type_id`: 1 light, 2 medium, 3 heavy, 4 shield.
pub fn armor(id: i64, name: &str, armor_type_id: u8, armor_class: i32) -> Value {
    let label = match armor_type_id {
        1 => "Light Armor",
        2 => "Medium Armor",
        3 => "Heavy Armor",
        _ => "Shield",
    };
    json!({
        "id": id,
        "equipped": true,
        "isAttuned": false,
        "quantity": 1,
        "definition": {
            "id": id * 10,
            "name": name,
            "filterType": "Armor",
            "type": label,
            "armorTypeId": armor_type_id,
            "armorClass": armor_class,
            "grantedModifiers": [],
            "canAttune": false,
            "magic": false,
            "weight": 10.0,
            "cost": 10.0,
        },
    })
}

/// An equipped wondrous item granting `+bonus` AC.
pub fn ac_ring(id: i64, bonus: i32, can_attune: bool, attuned: bool) -> Value {
    json!({
        "id": id,
        "equipped": true,
        "isAttuned": attuned,
        "quantity": 1,
        "definition": {
            "id": id * 10,
            "name": "Ring of Protection",
            "filterType": "Ring",
            "type": "Ring",
            "grantedModifiers": [effect("bonus", "armor-class", bonus)],
            "canAttune": can_attune,
            "magic": true,
            "rarity": "Rare",
        },
    })
}

fn title_case(s: &str) -> String {
    s.split('-')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_a_readable_character() {
        let ch = CharacterBuilder::new("Test")
            .stats([8, 14, 12, 10, 13, 15])
            .class(class(1, "Sorcerer", 3, spell_rules(1, 4, &[4, 2])))
            .modifier("race", effect("bonus", "charisma-score", 2))
            .build();
        assert_eq!(ch.stats[1].value, Some(14));
        assert_eq!(ch.total_level(), 3);
        assert_eq!(ch.modifiers.race[0].sub_type, "charisma-score");
        assert_eq!(ch.modifiers.race[0].friendly_subtype_name, "Charisma Score");
    }

    #[test]
    fn fixtures_load() {
        assert_eq!(characters::warlock_fighter().total_level(), 6);
        assert_eq!(characters::monk_5().total_level(), 5);
        assert!(try_load_fixture::<CharacterDocument>("characters/missing.json").is_none());
    }
}
