//! Cycle bookkeeping.
//!
//! A cycle is one submit → stage A → stage B sequence triggered by a single
//! user message. Only cycles that are still in flight are tracked; a cycle
//! leaves the active set when its package is stored or when it fails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::message::MessageId;

/// Per-conversation cycle identifier. Strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleId(u64);

impl CycleId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where an in-flight cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    /// User message recorded; stage A has not started yet.
    Queued,
    /// Stage A ("thinking") is running.
    AwaitingResponse,
    /// Stage A's message is in the log and stage B ("generating") is running.
    AwaitingArtifact,
}

impl CyclePhase {
    /// Whether this phase drives the conversation's `generating` flag.
    pub fn is_generating(&self) -> bool {
        matches!(self, CyclePhase::AwaitingArtifact)
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CyclePhase::Queued => "queued",
            CyclePhase::AwaitingResponse => "awaiting_response",
            CyclePhase::AwaitingArtifact => "awaiting_artifact",
        };
        f.write_str(label)
    }
}

/// The two asynchronous stages of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Stage A: the assistant acknowledges and starts analyzing.
    Response,
    /// Stage B: the evidence package is produced.
    Artifact,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Response => f.write_str("response stage"),
            Stage::Artifact => f.write_str("artifact stage"),
        }
    }
}

/// An in-flight cycle as seen from the conversation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCycle {
    pub id: CycleId,
    pub phase: CyclePhase,
    /// The user message that triggered the cycle.
    pub trigger: MessageId,
    pub started_at: DateTime<Utc>,
}
