//! Proficiency levels for skills and checks.

use serde::{Serialize, Serializer};

/// Proficiency level for skills and saves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProficiencyLevel {
    /// Not proficient
    #[default]
    None,
    /// Half proficiency (Jack of All Trades, Remarkable Athlete)
    Half,
    /// Standard proficiency
    Proficient,
    /// Expertise (double proficiency)
    Expert,
}

/// How a fractional proficiency contribution is rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rounding {
    #[default]
    Down,
    Up,
}

impl ProficiencyLevel {
    /// Get the multiplier for this proficiency level.
    pub fn multiplier(&self) -> f64 {
        match self {
            ProficiencyLevel::None => 0.0,
            ProficiencyLevel::Half => 0.5,
            ProficiencyLevel::Proficient => 1.0,
            ProficiencyLevel::Expert => 2.0,
        }
    }

    /// Contribution of the proficiency bonus at this level.
    ///
    /// `prof × multiplier`, floored unless the round-up variant applies.
    pub fn contribution(&self, proficiency_bonus: i32, rounding: Rounding) -> i32 {
        let raw = f64::from(proficiency_bonus) * self.multiplier();
        match rounding {
            Rounding::Down => raw.floor() as i32,
            Rounding::Up => raw.ceil() as i32,
        }
    }
}

/// Serialized the way the sheet stores it: 0, 0.5, 1 or 2.
impl Serialize for ProficiencyLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProficiencyLevel::Half => serializer.serialize_f64(0.5),
            ProficiencyLevel::None => serializer.serialize_u8(0),
            ProficiencyLevel::Proficient => serializer.serialize_u8(1),
            ProficiencyLevel::Expert => serializer.serialize_u8(2),
        }
    }
}
