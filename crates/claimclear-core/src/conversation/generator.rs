//! Capability traits for the two asynchronous stages.
//!
//! The workflow does not care whether a stage is a fixed timer or a network
//! round-trip. Implementations only have to resolve once per call; the
//! driver guarantees that a cycle's response is recorded before its artifact
//! is requested.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cycle::CycleId;
use crate::error::Result;

/// Input handed to both stages of a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub cycle: CycleId,
    /// The user message that triggered the cycle
    pub prompt: String,
    pub requested_at: DateTime<Utc>,
}

/// Output of stage B.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    pub file_name: String,
}

/// Produces the stage A assistant reply.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    /// Returns the assistant message content for this cycle.
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` when the underlying service fails.
    async fn respond(&self, request: &GenerationRequest) -> Result<String>;
}

/// Produces the stage B evidence document.
#[async_trait]
pub trait ArtifactGenerator: Send + Sync {
    /// Generates the document and reports its file name.
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` when the underlying service fails.
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedArtifact>;
}
