//! Loading character-builder exports.
//!
//! Exports come wrapped as `{ "character": { ... } }`, as the service's API
//! envelope `{ "data": { ... } }`, or as the bare character record.

use std::path::Path;

use charsheet_domain::SourceCharacter;
use serde_json::Value;

use crate::error::ImportError;

/// Read and decode an export file.
pub fn load_document(path: impl AsRef<Path>) -> Result<SourceCharacter, ImportError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImportError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Read character export");
    parse_document(&content)
}

/// Decode an export from its JSON text.
pub fn parse_document(content: &str) -> Result<SourceCharacter, ImportError> {
    let root: Value = serde_json::from_str(content)?;
    let record = unwrap_envelope(root)?;
    Ok(serde_json::from_value(record)?)
}

fn unwrap_envelope(root: Value) -> Result<Value, ImportError> {
    let Value::Object(mut map) = root else {
        return Err(ImportError::MissingCharacter);
    };
    for key in ["character", "data"] {
        match map.remove(key) {
            Some(inner @ Value::Object(_)) => return unwrap_envelope(inner),
            Some(Value::Null) | None => {}
            Some(_) => return Err(ImportError::MissingCharacter),
        }
    }
    if looks_like_character(&map) {
        Ok(Value::Object(map))
    } else {
        Err(ImportError::MissingCharacter)
    }
}

fn looks_like_character(map: &serde_json::Map<String, Value>) -> bool {
    ["stats", "classes", "race", "modifiers", "name"]
        .iter()
        .any(|key| map.contains_key(*key))
}
