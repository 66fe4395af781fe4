//! Read-only conversation view.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::cycle::{ActiveCycle, CyclePhase};
use super::evidence::EvidencePackage;
use super::message::Message;

/// Overall workflow position derived from the in-flight cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationPhase {
    /// No cycle in flight; ready for input.
    Idle,
    /// A cycle is queued or waiting for its stage A response.
    AwaitingResponse,
    /// A cycle is generating its evidence package.
    AwaitingArtifact,
}

impl fmt::Display for ConversationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConversationPhase::Idle => "idle",
            ConversationPhase::AwaitingResponse => "awaiting response",
            ConversationPhase::AwaitingArtifact => "generating",
        };
        f.write_str(label)
    }
}

/// Snapshot returned by `current_state()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    pub messages: Vec<Message>,
    pub generating: bool,
    pub evidence_package: Option<EvidencePackage>,
    pub active_cycles: Vec<ActiveCycle>,
    pub pending_input: String,
}

impl ConversationSnapshot {
    pub fn phase(&self) -> ConversationPhase {
        if self.generating {
            ConversationPhase::AwaitingArtifact
        } else if self
            .active_cycles
            .iter()
            .any(|c| matches!(c.phase, CyclePhase::Queued | CyclePhase::AwaitingResponse))
        {
            ConversationPhase::AwaitingResponse
        } else {
            ConversationPhase::Idle
        }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
