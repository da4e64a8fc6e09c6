//! Bonus expression value object.
//!
//! A bonus aggregated from rule effects is either a plain number or a number
//! plus one or more dice terms (e.g. Bless-style `1d4`). Both parts are kept
//! apart until the sheet is serialized.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BonusExpr {
    flat: i32,
    dice: Vec<String>,
}

impl BonusExpr {
    pub fn flat(value: i32) -> Self {
        Self {
            flat: value,
            dice: Vec::new(),
        }
    }

    pub fn dice(term: impl Into<String>) -> Self {
        Self {
            flat: 0,
            dice: vec![term.into()],
        }
    }

    pub fn flat_part(&self) -> i32 {
        self.flat
    }

    pub fn dice_terms(&self) -> &[String] {
        &self.dice
    }

    pub fn has_dice(&self) -> bool {
        !self.dice.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.flat == 0 && self.dice.is_empty()
    }

    pub fn push_dice(&mut self, term: impl Into<String>) {
        let term = term.into();
        if !term.is_empty() {
            self.dice.push(term);
        }
    }

    /// Shifts the numeric part, leaving dice untouched.
    pub fn offset(mut self, delta: i32) -> Self {
        self.flat += delta;
        self
    }

    /// Text form used when the bonus must be shown as a formula:
    /// `"<dice>"` or `"<dice> + <flat>"`, or just the number without dice.
    pub fn formula(&self) -> String {
        if self.dice.is_empty() {
            return self.flat.to_string();
        }
        let dice = self.dice.join(" + ");
        if self.flat == 0 {
            dice
        } else {
            format!("{} + {}", dice, self.flat)
        }
    }
}

impl fmt::Display for BonusExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formula())
    }
}

impl Add for BonusExpr {
    type Output = BonusExpr;

    fn add(mut self, rhs: BonusExpr) -> BonusExpr {
        self += rhs;
        self
    }
}

impl AddAssign for BonusExpr {
    fn add_assign(&mut self, rhs: BonusExpr) {
        self.flat += rhs.flat;
        self.dice.extend(rhs.dice);
    }
}

impl std::iter::Sum for BonusExpr {
    fn sum<I: Iterator<Item = BonusExpr>>(iter: I) -> Self {
        iter.fold(BonusExpr::default(), |acc, b| acc + b)
    }
}

/// Serialized as a number when there are no dice, otherwise as the formula.
impl Serialize for BonusExpr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.dice.is_empty() {
            serializer.serialize_i32(self.flat)
        } else {
            serializer.serialize_str(&self.formula())
        }
    }
}

/// Serializer for attack/damage bonus slots, where "nothing" is an empty string.
pub fn serialize_blank_when_zero<S: Serializer>(
    bonus: &BonusExpr,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if bonus.is_zero() {
        serializer.serialize_str("")
    } else {
        bonus.serialize(serializer)
    }
}
