//! Engine error types.
//!
//! `DeriveError` covers faults inside one resolver; the assembler isolates
//! them per field. `ImportError` covers reading the export itself.

use std::path::PathBuf;

use charsheet_domain::DomainError;
use thiserror::Error;

/// A resolver could not produce its field.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeriveError {
    /// Rule table or value-object failure.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The document refers to a record that is not there.
    #[error("{field}: no {kind} with id {id}")]
    MissingReference {
        field: &'static str,
        kind: &'static str,
        id: String,
    },
}

impl DeriveError {
    pub fn missing_reference(field: &'static str, kind: &'static str, id: impl ToString) -> Self {
        Self::MissingReference {
            field,
            kind,
            id: id.to_string(),
        }
    }
}

/// Reading or decoding an export failed.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Export file not found at {0}")]
    NotFound(PathBuf),
    #[error("Document has no character record")]
    MissingCharacter,
}
