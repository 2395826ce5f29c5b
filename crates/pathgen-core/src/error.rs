use thiserror::Error;

use crate::diagnostic::DiagnosticKind;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("Capacity exceeded: adding {requested} point(s) would go over the limit of {max}")]
    CapacityExceeded { requested: usize, max: usize },

    #[error("Insufficient length: cannot remove {requested} point(s), only {available} present")]
    InsufficientLength { requested: usize, available: usize },

    #[error("Curve has no segments left to delete")]
    EmptyCurve,

    #[error("Unsupported axis: {0}")]
    UnsupportedAxis(String),

    #[error("Generator has not been initialized")]
    NotInitialized,

    #[error("A generation batch is already in progress")]
    BatchInProgress,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Collider error: {0}")]
    Collider(String),

    #[error("Segment {index} out of range ({count} segments)")]
    SegmentOutOfRange { index: usize, count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl PathError {
    /// Category used when the error is recorded as a diagnostic.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            PathError::CapacityExceeded { .. } => DiagnosticKind::CapacityExceeded,
            PathError::InsufficientLength { .. } => DiagnosticKind::InsufficientLength,
            PathError::EmptyCurve => DiagnosticKind::EmptyCurve,
            PathError::UnsupportedAxis(_) => DiagnosticKind::UnsupportedAxis,
            PathError::NotInitialized => DiagnosticKind::NotInitialized,
            PathError::BatchInProgress => DiagnosticKind::AlreadyRunning,
            PathError::InvalidConfig(_) | PathError::Config(_) | PathError::Io(_) => {
                DiagnosticKind::InvalidConfig
            }
            PathError::Collider(_) => DiagnosticKind::Collider,
            PathError::SegmentOutOfRange { .. } => DiagnosticKind::EmptyCurve,
        }
    }
}

pub type Result<T> = std::result::Result<T, PathError>;
