//! Conversation state and its transitions.
//!
//! `ConversationState` holds the whole chat: the message log, the current
//! evidence package, the in-flight cycles and the pending-input buffer. It is
//! driven exclusively through the `apply_*` transitions, each of which takes
//! the current instant explicitly and either fully applies or leaves the
//! state untouched.
//!
//! The state performs no scheduling of its own. An external driver decides
//! when a stage has finished and applies the matching transition.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use super::cycle::{ActiveCycle, CycleId, CyclePhase};
use super::evidence::EvidencePackage;
use super::message::{Message, MessageId, Sender};
use super::snapshot::ConversationSnapshot;
use crate::error::{ClaimClearError, Result};

/// The chat workflow's complete state.
#[derive(Debug, Clone)]
pub struct ConversationState {
    /// Append-only message log
    messages: Vec<Message>,
    /// Package of the most recently completed cycle
    evidence_package: Option<EvidencePackage>,
    /// In-flight cycles, ordered by submission
    active_cycles: BTreeMap<CycleId, ActiveCycle>,
    /// Text typed but not yet submitted
    pending_input: String,
    next_message_seq: u64,
    next_cycle_seq: u64,
}

impl ConversationState {
    /// Creates a conversation seeded with one assistant greeting.
    pub fn new(greeting: impl Into<String>, now: DateTime<Utc>) -> Self {
        let greeting = Message {
            id: MessageId::greeting(),
            content: greeting.into(),
            sender: Sender::Assistant,
            timestamp: now,
        };

        Self {
            messages: vec![greeting],
            evidence_package: None,
            active_cycles: BTreeMap::new(),
            pending_input: String::new(),
            next_message_seq: 1,
            next_cycle_seq: 1,
        }
    }

    // ============================================================================
    // Queries
    // ============================================================================

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn evidence_package(&self) -> Option<&EvidencePackage> {
        self.evidence_package.as_ref()
    }

    /// True while at least one cycle is between its stage A message and its
    /// completion message.
    pub fn generating(&self) -> bool {
        self.active_cycles
            .values()
            .any(|cycle| cycle.phase.is_generating())
    }

    pub fn active_cycles(&self) -> impl Iterator<Item = &ActiveCycle> {
        self.active_cycles.values()
    }

    pub fn active_cycle_count(&self) -> usize {
        self.active_cycles.len()
    }

    pub fn has_active_cycles(&self) -> bool {
        !self.active_cycles.is_empty()
    }

    /// Phase of an in-flight cycle, or `None` once it has finished.
    pub fn cycle_phase(&self, cycle: CycleId) -> Option<CyclePhase> {
        self.active_cycles.get(&cycle).map(|c| c.phase)
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Replaces the pending-input buffer.
    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    /// Empties the pending-input buffer and returns what it held.
    pub fn take_pending_input(&mut self) -> String {
        std::mem::take(&mut self.pending_input)
    }

    /// Returns a read-only copy for renderers.
    pub fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            messages: self.messages.clone(),
            generating: self.generating(),
            evidence_package: self.evidence_package.clone(),
            active_cycles: self.active_cycles.values().cloned().collect(),
            pending_input: self.pending_input.clone(),
        }
    }

    // ============================================================================
    // Transitions
    // ============================================================================

    /// Records a user submission and opens a new cycle in `Queued`.
    ///
    /// Returns `None` (and changes nothing, including the pending input) when
    /// `text` is empty after trimming. Otherwise the message keeps the text as
    /// given and the pending-input buffer is cleared.
    pub fn apply_user_message(
        &mut self,
        text: &str,
        now: DateTime<Utc>,
    ) -> Option<(CycleId, Message)> {
        if text.trim().is_empty() {
            return None;
        }

        let message = self.push_message(Sender::User, text, now);
        self.pending_input.clear();

        let cycle = CycleId::new(self.next_cycle_seq);
        self.next_cycle_seq += 1;
        self.active_cycles.insert(
            cycle,
            ActiveCycle {
                id: cycle,
                phase: CyclePhase::Queued,
                trigger: message.id.clone(),
                started_at: now,
            },
        );

        Some((cycle, message))
    }

    /// Marks the start of stage A for a queued cycle.
    pub fn apply_stage_a_started(&mut self, cycle: CycleId) -> Result<()> {
        self.expect_phase(cycle, CyclePhase::Queued)?;
        self.set_phase(cycle, CyclePhase::AwaitingResponse);
        Ok(())
    }

    /// Appends the stage A assistant message and moves the cycle into
    /// `AwaitingArtifact`, which raises `generating`.
    pub fn apply_stage_a_complete(
        &mut self,
        cycle: CycleId,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Message> {
        self.expect_phase(cycle, CyclePhase::AwaitingResponse)?;
        let message = self.push_message(Sender::Assistant, content, now);
        self.set_phase(cycle, CyclePhase::AwaitingArtifact);
        Ok(message)
    }

    /// Closes a cycle successfully: stores a new package (replacing any
    /// previous one) and appends the completion message.
    pub fn apply_stage_b_complete(
        &mut self,
        cycle: CycleId,
        artifact_name: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<(EvidencePackage, Message)> {
        self.expect_phase(cycle, CyclePhase::AwaitingArtifact)?;
        self.active_cycles.remove(&cycle);

        let package = EvidencePackage::new(artifact_name, cycle, now);
        self.evidence_package = Some(package.clone());
        let message = self.push_message(Sender::Assistant, content, now);

        Ok((package, message))
    }

    /// Closes a cycle after a stage failure. The existing package, if any, is
    /// left alone and no new one is created.
    pub fn apply_stage_failed(
        &mut self,
        cycle: CycleId,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Message> {
        if self.active_cycles.remove(&cycle).is_none() {
            return Err(ClaimClearError::not_found("cycle", cycle.to_string()));
        }
        Ok(self.push_message(Sender::Assistant, content, now))
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn push_message(&mut self, sender: Sender, content: &str, now: DateTime<Utc>) -> Message {
        let id = MessageId::sequenced(now, self.next_message_seq);
        self.next_message_seq += 1;

        let message = Message {
            id,
            content: content.to_string(),
            sender,
            timestamp: now,
        };
        self.messages.push(message.clone());
        message
    }

    fn expect_phase(&self, cycle: CycleId, expected: CyclePhase) -> Result<()> {
        let actual = self.cycle_phase(cycle);
        if actual == Some(expected) {
            Ok(())
        } else {
            Err(ClaimClearError::InvalidTransition {
                cycle,
                expected,
                actual,
            })
        }
    }

    fn set_phase(&mut self, cycle: CycleId, phase: CyclePhase) {
        if let Some(active) = self.active_cycles.get_mut(&cycle) {
            active.phase = phase;
        }
    }
}
