use serde::{Deserialize, Serialize};

use super::cycle::{CycleId, Stage};
use super::evidence::EvidencePackage;
use super::message::Message;

/// Notifications published to subscribers as transitions are applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent {
    /// A message was appended to the log.
    MessageAppended { message: Message },
    /// The derived `generating` flag flipped.
    GeneratingChanged { generating: bool },
    /// A cycle finished and its package is now current.
    PackageReady { package: EvidencePackage },
    /// A cycle was abandoned after a stage failure or timeout.
    CycleFailed {
        cycle: CycleId,
        stage: Stage,
        reason: String,
    },
}
