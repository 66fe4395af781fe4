//! Error types for the ClaimClear workspace.

use serde::Serialize;
use thiserror::Error;

use crate::conversation::{CycleId, CyclePhase, Stage};

/// A shared error type for the entire ClaimClear workspace.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum ClaimClearError {
    /// Download requested before any cycle produced an evidence package
    #[error("Evidence package unavailable: no generation cycle has completed yet")]
    ArtifactUnavailable,

    /// Submission rejected because another cycle is still running
    #[error("A generation cycle is already in flight ({active} active)")]
    CycleInFlight { active: usize },

    /// An external generation service reported a failure
    #[error("Generation failed during {stage}: {message}")]
    GenerationFailed { stage: Stage, message: String },

    /// A stage exceeded its upper time bound
    #[error("{stage} timed out after {after_ms} ms")]
    Timeout { stage: Stage, after_ms: u64 },

    /// A transition was applied to a cycle in the wrong phase
    #[error("Invalid transition for cycle {cycle}: expected {expected}, found {actual:?}")]
    InvalidTransition {
        cycle: CycleId,
        expected: CyclePhase,
        /// `None` when the cycle is not active at all
        actual: Option<CyclePhase>,
    },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClaimClearError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates a GenerationFailed error for the given stage
    pub fn generation_failed(stage: Stage, message: impl Into<String>) -> Self {
        Self::GenerationFailed {
            stage,
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an ArtifactUnavailable error
    pub fn is_artifact_unavailable(&self) -> bool {
        matches!(self, Self::ArtifactUnavailable)
    }

    /// Check if this is a CycleInFlight rejection
    pub fn is_cycle_in_flight(&self) -> bool {
        matches!(self, Self::CycleInFlight { .. })
    }

    /// Check if this is a stage timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns the stage a generation error belongs to, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::GenerationFailed { stage, .. } | Self::Timeout { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ClaimClearError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ClaimClearError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ClaimClearError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ClaimClearError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error, used at service boundaries
impl From<anyhow::Error> for ClaimClearError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, ClaimClearError>`.
pub type Result<T> = std::result::Result<T, ClaimClearError>;
