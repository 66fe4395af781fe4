//! Conversation message types.
//!
//! Messages are immutable once created. The log that holds them is
//! append-only, so insertion order is the only ordering there is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// Message typed by the patient.
    User,
    /// Message produced by the assistant.
    Assistant,
}

impl Sender {
    /// Lowercase label used in logs and JSON output.
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque, process-unique message identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Identifier of the greeting every conversation starts with.
    pub const GREETING: &'static str = "welcome";

    pub(crate) fn greeting() -> Self {
        Self(Self::GREETING.to_string())
    }

    /// Builds an id from a wall-clock instant and a per-conversation sequence.
    ///
    /// The sequence alone guarantees uniqueness; the timestamp only makes ids
    /// readable when two messages land in the same millisecond.
    pub(crate) fn sequenced(at: DateTime<Utc>, sequence: u64) -> Self {
        Self(format!("msg-{}-{}", at.timestamp_millis(), sequence))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single entry in the conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier within the conversation.
    pub id: MessageId,
    /// Text exactly as submitted or generated.
    pub content: String,
    /// Who wrote the message.
    pub sender: Sender,
    /// Instant the message was appended.
    pub timestamp: DateTime<Utc>,
}
