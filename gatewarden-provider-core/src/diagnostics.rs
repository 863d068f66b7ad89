//! Severity-tagged diagnostic records.
//!
//! The provider surfaces failures to the IaC framework as an ordered list
//! of (severity, summary, detail) records rather than by halting. Core
//! operations return `Result<T, Diagnostics>` where the `Err` side always
//! holds at least one error-severity record: callers either get a usable
//! value or a non-empty explanation, never both.

use serde::Serialize;

use crate::errors::ProviderError;

/// Severity of a single diagnostic record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The operation's return value must not be trusted
    Error,
    /// Informational; the return value is still usable
    Warning,
}

/// One diagnostic record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Record severity
    pub severity: Severity,
    /// Short stable headline (e.g. "Missing db_auth Profile")
    pub summary: String,
    /// Full human-readable detail
    pub detail: String,
}

/// Ordered, append-only collection of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    /// New empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error-severity record
    pub fn push_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.records.push(Diagnostic {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
        });
    }

    /// Append a warning-severity record
    pub fn push_warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.records.push(Diagnostic {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        });
    }

    /// True if any record carries error severity
    pub fn has_error(&self) -> bool {
        self.records
            .iter()
            .any(|r| r.severity == Severity::Error)
    }

    /// Records in append order
    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records have been appended
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<ProviderError> for Diagnostics {
    fn from(error: ProviderError) -> Self {
        let mut diagnostics = Self::new();
        diagnostics.push_error(error.summary(), error.to_string());
        diagnostics
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
