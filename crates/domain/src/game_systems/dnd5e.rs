//! D&D 5th Edition rule math.

use crate::error::DomainError;

/// XP thresholds for each level (index 0 = level 1).
const XP_THRESHOLDS: [i64; 20] = [
    0,      // Level 1
    300,    // Level 2
    900,    // Level 3
    2700,   // Level 4
    6500,   // Level 5
    14000,  // Level 6
    23000,  // Level 7
    34000,  // Level 8
    48000,  // Level 9
    64000,  // Level 10
    85000,  // Level 11
    100000, // Level 12
    120000, // Level 13
    140000, // Level 14
    165000, // Level 15
    195000, // Level 16
    225000, // Level 17
    265000, // Level 18
    305000, // Level 19
    355000, // Level 20
];

/// Highest character / caster level covered by the tables.
pub const MAX_LEVEL: i32 = 20;

/// Spell slots per spell level (1..9) by combined caster level (0..20), used
/// when a character has zero or several independent spellcasting classes.
pub const MULTICLASS_SPELL_SLOTS: [[i32; 9]; 21] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0], // 0
    [2, 0, 0, 0, 0, 0, 0, 0, 0], // 1
    [3, 0, 0, 0, 0, 0, 0, 0, 0], // 2
    [4, 2, 0, 0, 0, 0, 0, 0, 0], // 3
    [4, 3, 0, 0, 0, 0, 0, 0, 0], // 4
    [4, 3, 2, 0, 0, 0, 0, 0, 0], // 5
    [4, 3, 3, 0, 0, 0, 0, 0, 0], // 6
    [4, 3, 3, 1, 0, 0, 0, 0, 0], // 7
    [4, 3, 3, 2, 0, 0, 0, 0, 0], // 8
    [4, 3, 3, 3, 1, 0, 0, 0, 0], // 9
    [4, 3, 3, 3, 2, 0, 0, 0, 0], // 10
    [4, 3, 3, 3, 2, 1, 0, 0, 0], // 11
    [4, 3, 3, 3, 2, 1, 0, 0, 0], // 12
    [4, 3, 3, 3, 2, 1, 1, 0, 0], // 13
    [4, 3, 3, 3, 2, 1, 1, 0, 0], // 14
    [4, 3, 3, 3, 2, 1, 1, 1, 0], // 15
    [4, 3, 3, 3, 2, 1, 1, 1, 0], // 16
    [4, 3, 3, 3, 2, 1, 1, 1, 1], // 17
    [4, 3, 3, 3, 3, 1, 1, 1, 1], // 18
    [4, 3, 3, 3, 3, 2, 1, 1, 1], // 19
    [4, 3, 3, 3, 3, 2, 2, 1, 1], // 20
];

/// Ability modifier: floor((score - 10) / 2).
pub fn ability_modifier(score: i32) -> i32 {
    // Rust's / rounds toward zero, so floor explicitly
    (score - 10).div_euclid(2)
}

/// Proficiency bonus: ceil(1 + total level / 4).
pub fn proficiency_bonus(total_level: i32) -> i32 {
    1 + (total_level.max(0) + 3) / 4
}

/// Row of the multiclass table for a combined caster level.
pub fn multiclass_spell_slots(caster_level: i32) -> Result<[i32; 9], DomainError> {
    usize::try_from(caster_level)
        .ok()
        .and_then(|level| MULTICLASS_SPELL_SLOTS.get(level))
        .copied()
        .ok_or_else(|| {
            DomainError::validation(format!(
                "caster level {} outside the spell slot table",
                caster_level
            ))
        })
}

/// XP bounds (current level threshold, next level threshold).
pub fn xp_bounds(total_level: i32) -> (i64, i64) {
    let idx = total_level.clamp(1, MAX_LEVEL) as usize - 1;
    let next = XP_THRESHOLDS[(idx + 1).min(XP_THRESHOLDS.len() - 1)];
    (XP_THRESHOLDS[idx], next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ability_modifier_floors() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(20), 5);
        assert_eq!(ability_modifier(0), -5);
    }

    #[test]
    fn proficiency_bonus_by_level() {
        assert_eq!(proficiency_bonus(0), 1);
        assert_eq!(proficiency_bonus(1), 2);
        assert_eq!(proficiency_bonus(4), 2);
        assert_eq!(proficiency_bonus(5), 3);
        assert_eq!(proficiency_bonus(9), 4);
        assert_eq!(proficiency_bonus(13), 5);
        assert_eq!(proficiency_bonus(17), 6);
        assert_eq!(proficiency_bonus(20), 6);
    }

    #[test]
    fn multiclass_table_rows() {
        assert_eq!(multiclass_spell_slots(0).expect("row"), [0; 9]);
        assert_eq!(
            multiclass_spell_slots(5).expect("row"),
            [4, 3, 2, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            multiclass_spell_slots(20).expect("row"),
            [4, 3, 3, 3, 3, 2, 2, 1, 1]
        );
        assert!(multiclass_spell_slots(21).is_err());
        assert!(multiclass_spell_slots(-1).is_err());
    }

    #[test]
    fn xp_bounds_follow_thresholds() {
        assert_eq!(xp_bounds(1), (0, 300));
        assert_eq!(xp_bounds(5), (6500, 14000));
        assert_eq!(xp_bounds(20), (355000, 355000));
        assert_eq!(xp_bounds(0), (0, 300));
    }
}
