//! Host-facing diagnostics
//!
//! The host understands two things: a state snapshot and a list of
//! diagnostics. Errors become error diagnostics at the boundary; drift
//! and other non-blocking findings are warnings that travel alongside a
//! committed state.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Reconciler operation a diagnostic is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    /// Summary line used for error diagnostics of this operation
    pub fn error_summary(self) -> &'static str {
        match self {
            Operation::Create => "Create Error",
            Operation::Read => "Read Error",
            Operation::Update => "Update Error",
            Operation::Delete => "Delete Error",
        }
    }
}

/// A single diagnostic returned to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    /// Create an error diagnostic
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// Create a warning diagnostic
    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// Convert a failed operation into an error diagnostic
    pub fn from_error(operation: Operation, err: &Error) -> Self {
        Self::error(operation.error_summary(), err.to_string())
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// True if any diagnostic in the slice is an error
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}
