//! Diagnostic sink for non-fatal derivation problems.
//!
//! Unknown items and isolated resolver failures are reported here instead of
//! aborting the derivation. The default sink turns them into tracing events.

use std::sync::Mutex;

/// Category used for inventory problems.
pub const CATEGORY_CHARACTER: &str = "character";
/// Category used for resolver failures.
pub const CATEGORY_DERIVE: &str = "derive";

#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, category: &str, message: &str);
}

/// Emits each diagnostic as a `WARN` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, category: &str, message: &str) {
        tracing::warn!(category, "{}", message);
    }
}

/// A reported diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: String,
    pub message: String,
}

/// Keeps diagnostics in memory, e.g. to print a summary after a batch.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for CollectingDiagnostics {
    fn report(&self, category: &str, message: &str) {
        tracing::debug!(category, "{}", message);
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(Diagnostic {
                category: category.to_string(),
                message: message.to_string(),
            });
        }
    }
}
