//! The chat workflow use case.
//!
//! `ConversationOrchestrator` accepts submissions, records the user message
//! synchronously and hands the rest of the cycle to a background task driven
//! by [`CycleExecutor`]. Readers observe the conversation through snapshots
//! or by subscribing to [`ConversationEvent`]s.

use chrono::Utc;
use claimclear_core::config::{CyclePolicy, RootConfig};
use claimclear_core::conversation::{
    ArtifactGenerator, ArtifactReference, ArtifactStore, ConversationEvent, ConversationSnapshot,
    ConversationState, CycleId, Message, ResponseGenerator,
};
use claimclear_core::{ClaimClearError, Result};
use claimclear_execution::{CycleExecutor, CycleOutcome};
use claimclear_infrastructure::{DirectoryArtifactStore, InMemoryArtifactStore};
use claimclear_interaction::{CannedResponseGenerator, SimulatedArtifactGenerator};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock, broadcast, oneshot};
use tokio::task::JoinHandle;

/// Capacity of the event channel. Slow subscribers see `Lagged`.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Result of a submission.
#[derive(Debug)]
pub enum Submission {
    /// The text was blank; nothing happened.
    Ignored,
    /// A cycle was started.
    Accepted(CycleTicket),
}

impl Submission {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Submission::Ignored)
    }

    pub fn ticket(self) -> Option<CycleTicket> {
        match self {
            Submission::Accepted(ticket) => Some(ticket),
            Submission::Ignored => None,
        }
    }
}

/// Handle to an accepted cycle.
#[derive(Debug)]
pub struct CycleTicket {
    pub cycle: CycleId,
    /// The user message appended on submission
    pub user_message: Message,
    handle: JoinHandle<CycleOutcome>,
}

impl CycleTicket {
    /// Waits for the cycle to finish.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the cycle task panicked or was aborted.
    pub async fn wait(self) -> Result<CycleOutcome> {
        self.handle
            .await
            .map_err(|e| ClaimClearError::internal(format!("cycle task ended abnormally: {e}")))
    }
}

/// Coordinates conversation state, generators and the artifact store.
pub struct ConversationOrchestrator {
    state: Arc<RwLock<ConversationState>>,
    executor: CycleExecutor,
    artifact_store: Arc<dyn ArtifactStore>,
    policy: CyclePolicy,
    /// Completion signal of the most recently queued cycle (serial policy)
    serial_tail: Mutex<Option<oneshot::Receiver<()>>>,
    events: broadcast::Sender<ConversationEvent>,
}

impl ConversationOrchestrator {
    /// Starts a builder seeded from configuration.
    pub fn builder(config: &RootConfig) -> OrchestratorBuilder {
        OrchestratorBuilder::new(config)
    }

    /// Builds an orchestrator with the simulated generators.
    pub fn from_config(config: &RootConfig) -> Self {
        Self::builder(config).build()
    }

    /// Submits user text.
    ///
    /// Blank text is ignored. Otherwise the user message is appended before
    /// this returns, and the cycle continues in the background.
    ///
    /// # Errors
    ///
    /// Returns `CycleInFlight` under the reject policy while a cycle is active.
    pub async fn submit(&self, text: &str) -> Result<Submission> {
        let (cycle, message, previous, done) = {
            let mut state = self.state.write().await;

            if text.trim().is_empty() {
                tracing::debug!("Ignoring blank submission");
                return Ok(Submission::Ignored);
            }

            if self.policy == CyclePolicy::Reject && state.has_active_cycles() {
                let active = state.active_cycle_count();
                tracing::info!(active, "Rejecting submission while a cycle is in flight");
                return Err(ClaimClearError::CycleInFlight { active });
            }

            let Some((cycle, message)) = state.apply_user_message(text, Utc::now()) else {
                return Ok(Submission::Ignored);
            };

            // Queue position is fixed while the state lock is held
            let (previous, done) = if self.policy == CyclePolicy::Serial {
                let (tx, rx) = oneshot::channel();
                let previous = self.serial_tail.lock().await.replace(rx);
                (previous, Some(tx))
            } else {
                (None, None)
            };

            // Sent under the guard so the stream follows the log order
            let _ = self.events.send(ConversationEvent::MessageAppended {
                message: message.clone(),
            });

            (cycle, message, previous, done)
        };
        tracing::info!(cycle = cycle.value(), policy = %self.policy, "Cycle accepted");

        let executor = self.executor.clone();
        let prompt = message.content.clone();
        let handle = tokio::spawn(async move {
            // Dropping the sender releases the next cycle, even on panic
            let _done = done;
            if let Some(previous) = previous {
                let _ = previous.await;
            }
            executor.run(cycle, prompt).await
        });

        Ok(Submission::Accepted(CycleTicket {
            cycle,
            user_message: message,
            handle,
        }))
    }

    /// Submits whatever is in the pending-input buffer.
    pub async fn submit_pending(&self) -> Result<Submission> {
        let text = self.state.read().await.pending_input().to_string();
        self.submit(&text).await
    }

    pub async fn set_pending_input(&self, text: impl Into<String>) {
        self.state.write().await.set_pending_input(text);
    }

    pub async fn current_state(&self) -> ConversationSnapshot {
        self.state.read().await.snapshot()
    }

    /// Resolves a download reference for the current evidence package.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactUnavailable` if no cycle has completed yet.
    pub async fn download_artifact(&self) -> Result<ArtifactReference> {
        let package = self
            .state
            .read()
            .await
            .evidence_package()
            .cloned()
            .ok_or(ClaimClearError::ArtifactUnavailable)?;

        self.artifact_store.reference_for(&package)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.events.subscribe()
    }
}

/// Assembles a [`ConversationOrchestrator`].
///
/// Unset collaborators default to the simulated generators and, depending on
/// `[artifact] output_dir`, the directory or in-memory artifact store.
pub struct OrchestratorBuilder {
    config: RootConfig,
    responder: Option<Arc<dyn ResponseGenerator>>,
    artifacts: Option<Arc<dyn ArtifactGenerator>>,
    artifact_store: Option<Arc<dyn ArtifactStore>>,
}

impl OrchestratorBuilder {
    fn new(config: &RootConfig) -> Self {
        Self {
            config: config.clone(),
            responder: None,
            artifacts: None,
            artifact_store: None,
        }
    }

    pub fn response_generator(mut self, responder: Arc<dyn ResponseGenerator>) -> Self {
        self.responder = Some(responder);
        self
    }

    pub fn artifact_generator(mut self, artifacts: Arc<dyn ArtifactGenerator>) -> Self {
        self.artifacts = Some(artifacts);
        self
    }

    pub fn artifact_store(mut self, store: Arc<dyn ArtifactStore>) -> Self {
        self.artifact_store = Some(store);
        self
    }

    pub fn build(self) -> ConversationOrchestrator {
        let config = self.config;
        let responder = self
            .responder
            .unwrap_or_else(|| Arc::new(CannedResponseGenerator::from_config(&config)));
        let artifacts = self
            .artifacts
            .unwrap_or_else(|| Arc::new(SimulatedArtifactGenerator::from_config(&config)));
        let artifact_store = self.artifact_store.unwrap_or_else(|| -> Arc<dyn ArtifactStore> {
            match &config.artifact.output_dir {
                Some(dir) => Arc::new(DirectoryArtifactStore::new(dir)),
                None => Arc::new(InMemoryArtifactStore),
            }
        });

        let state = Arc::new(RwLock::new(ConversationState::new(
            config.templates.greeting.clone(),
            Utc::now(),
        )));
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let executor = CycleExecutor::new(
            state.clone(),
            responder,
            artifacts,
            Arc::new(config.templates.clone()),
            events.clone(),
        )
        .with_stage_timeout(config.orchestrator.stage_timeout);

        ConversationOrchestrator {
            state,
            executor,
            artifact_store,
            policy: config.orchestrator.cycle_policy,
            serial_tail: Mutex::new(None),
            events,
        }
    }
}
