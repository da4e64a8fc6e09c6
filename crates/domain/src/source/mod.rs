//! Type definitions for the character-builder export format.
//!
//! These types mirror the export's JSON schema closely; the engine derives the
//! sheet from them without mutating them. Collections default to empty and
//! explicit `null`s are tolerated wherever the exporter is known to emit them.

mod character;
mod inventory;
mod modifier;

pub use character::*;
pub use inventory::*;
pub use modifier::*;

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identifiers are numeric in most places but strings in some (`"class-412"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SourceId {
    Number(i64),
    Text(String),
}

impl Default for SourceId {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl SourceId {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Free-form scalar as found in `characterValues[].value`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ScalarValue {
    /// The exporter's notion of "set": non-empty text, non-zero number, `true`.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Float(f) => *f != 0.0,
            Self::Text(s) => !s.is_empty(),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Bool(_) => None,
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_id_accepts_numbers_and_strings() {
        let n: SourceId = serde_json::from_str("42").expect("number id");
        let s: SourceId = serde_json::from_str("\"class-42\"").expect("text id");
        assert_eq!(n.as_i64(), Some(42));
        assert_eq!(s.as_i64(), None);
        assert_eq!(s.to_string(), "class-42");
    }

    #[test]
    fn scalar_presence() {
        assert!(ScalarValue::Text("Sunblade".into()).is_present());
        assert!(!ScalarValue::Text(String::new()).is_present());
        assert!(!ScalarValue::Int(0).is_present());
        assert_eq!(ScalarValue::Text(" 2.5".into()).as_f64(), Some(2.5));
    }
}
