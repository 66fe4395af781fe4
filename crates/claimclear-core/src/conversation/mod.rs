//! Conversation domain module.
//!
//! This module contains the chat workflow that turns a user question into an
//! evidence package: the append-only message log, the per-cycle phases, and
//! the pure transitions an external scheduler applies as each stage finishes.
//!
//! # Module Structure
//!
//! - `message`: Chat messages (`Message`, `MessageId`, `Sender`)
//! - `cycle`: Cycle bookkeeping (`CycleId`, `CyclePhase`, `Stage`, `ActiveCycle`)
//! - `evidence`: The generated artifact (`EvidencePackage`, `ArtifactReference`)
//! - `templates`: Canned assistant responses keyed by stage
//! - `state`: `ConversationState` and its transitions
//! - `snapshot`: Read-only view handed to renderers
//! - `event`: Notifications published as transitions happen
//! - `generator`: Capability traits for the two asynchronous stages
//! - `artifact_store`: Resolves a package into a downloadable reference
//!
//! # Usage
//!
//! ```
//! use chrono::Utc;
//! use claimclear_core::conversation::{ConversationState, ResponseTemplates};
//!
//! let templates = ResponseTemplates::default();
//! let mut state = ConversationState::new(&templates.greeting, Utc::now());
//!
//! let (cycle, _message) = state
//!     .apply_user_message("What is my treatment status?", Utc::now())
//!     .expect("non-empty input starts a cycle");
//! assert_eq!(state.messages().len(), 2);
//! assert!(!state.generating());
//! # let _ = cycle;
//! ```

mod artifact_store;
mod cycle;
mod event;
mod evidence;
mod generator;
mod message;
mod snapshot;
mod state;
mod templates;

// Re-export public API
pub use artifact_store::ArtifactStore;
pub use cycle::{ActiveCycle, CycleId, CyclePhase, Stage};
pub use event::ConversationEvent;
pub use evidence::{ArtifactReference, EvidencePackage};
pub use generator::{ArtifactGenerator, GeneratedArtifact, GenerationRequest, ResponseGenerator};
pub use message::{Message, MessageId, Sender};
pub use snapshot::{ConversationPhase, ConversationSnapshot};
pub use state::ConversationState;
pub use templates::{
    ANALYSIS_RESPONSE, COMPLETION_RESPONSE, DEFAULT_ARTIFACT_NAME, FAILURE_RESPONSE,
    GENERATING_INDICATOR, GREETING, ResponseTemplates,
};
