//! Non-fatal diagnostics surfaced to the host.
//!
//! Generators never abort on a recoverable condition. Instead they log it
//! through `tracing` and keep a [`Diagnostic`] record the host can drain.

use serde::{Deserialize, Serialize};

use crate::error::PathError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    CapacityExceeded,
    InsufficientLength,
    EmptyCurve,
    UnsupportedAxis,
    NotInitialized,
    InvalidConfig,
    Collider,
    AlreadyRunning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Log `err` at warn level on behalf of `source` and return its record.
    pub fn warn(source: &str, err: &PathError) -> Self {
        tracing::warn!(generator = %source, "{}", err);
        Self::new(err.kind(), format!("{}: {}", source, err))
    }

    /// Same as [`Diagnostic::warn`] but logged at debug level, for
    /// conditions the host usually does not care about.
    pub fn debug(source: &str, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::debug!(generator = %source, "{}", message);
        Self::new(kind, format!("{}: {}", source, message))
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)
    }
}
