//! Drives a single cycle through both generation stages.

use chrono::Utc;
use claimclear_core::conversation::{
    ArtifactGenerator, ConversationEvent, ConversationState, CycleId, EvidencePackage,
    GenerationRequest, ResponseGenerator, ResponseTemplates, Stage,
};
use claimclear_core::{ClaimClearError, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, broadcast};
use tracing::Instrument;

/// How a cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Both stages finished and the package is current (until a later cycle replaces it).
    Completed { package: EvidencePackage },
    /// A stage failed or timed out; the failure message has been appended.
    Failed(ClaimClearError),
}

impl CycleOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, CycleOutcome::Completed { .. })
    }

    pub fn package(&self) -> Option<&EvidencePackage> {
        match self {
            CycleOutcome::Completed { package } => Some(package),
            CycleOutcome::Failed(_) => None,
        }
    }
}

/// Runs cycles against a shared conversation.
///
/// Every state change happens inside one short write section, and its events
/// are sent before that section ends. The lock is never held while a
/// generator is awaited.
#[derive(Clone)]
pub struct CycleExecutor {
    state: Arc<RwLock<ConversationState>>,
    responder: Arc<dyn ResponseGenerator>,
    artifacts: Arc<dyn ArtifactGenerator>,
    templates: Arc<ResponseTemplates>,
    stage_timeout: Option<Duration>,
    events: broadcast::Sender<ConversationEvent>,
}

impl CycleExecutor {
    pub fn new(
        state: Arc<RwLock<ConversationState>>,
        responder: Arc<dyn ResponseGenerator>,
        artifacts: Arc<dyn ArtifactGenerator>,
        templates: Arc<ResponseTemplates>,
        events: broadcast::Sender<ConversationEvent>,
    ) -> Self {
        Self {
            state,
            responder,
            artifacts,
            templates,
            stage_timeout: None,
            events,
        }
    }

    /// Sets the upper bound applied to each stage. `None` disables it.
    pub fn with_stage_timeout(mut self, stage_timeout: Option<Duration>) -> Self {
        self.stage_timeout = stage_timeout;
        self
    }

    /// Runs `cycle` to completion. The cycle must already be `Queued`.
    pub async fn run(&self, cycle: CycleId, prompt: String) -> CycleOutcome {
        let span = tracing::info_span!("cycle", cycle = cycle.value());
        self.run_stages(cycle, prompt).instrument(span).await
    }

    async fn run_stages(&self, cycle: CycleId, prompt: String) -> CycleOutcome {
        if let Err(err) = self.state.write().await.apply_stage_a_started(cycle) {
            tracing::error!(error = %err, "Cycle could not be started");
            return CycleOutcome::Failed(err);
        }
        tracing::debug!("Stage A started");

        let request = GenerationRequest {
            cycle,
            prompt,
            requested_at: Utc::now(),
        };

        let content = match self
            .guarded(Stage::Response, self.responder.respond(&request))
            .await
        {
            Ok(content) => content,
            Err(err) => return self.fail(cycle, Stage::Response, err).await,
        };

        {
            let mut state = self.state.write().await;
            let was_generating = state.generating();
            let applied = state.apply_stage_a_complete(cycle, &content, Utc::now());
            match applied {
                Ok(message) => {
                    let mut events = vec![ConversationEvent::MessageAppended { message }];
                    push_generating_change(&mut events, was_generating, state.generating());
                    self.publish(events);
                }
                Err(err) => {
                    drop(state);
                    return self.fail(cycle, Stage::Response, err).await;
                }
            }
        }
        tracing::debug!("Stage A complete, generating evidence package");

        let artifact = match self
            .guarded(Stage::Artifact, self.artifacts.generate(&request))
            .await
        {
            Ok(artifact) => artifact,
            Err(err) => return self.fail(cycle, Stage::Artifact, err).await,
        };

        let package = {
            let mut state = self.state.write().await;
            let was_generating = state.generating();
            let applied = state.apply_stage_b_complete(
                cycle,
                &artifact.file_name,
                &self.templates.completion,
                Utc::now(),
            );
            match applied {
                Ok((package, message)) => {
                    let mut events = vec![
                        ConversationEvent::PackageReady {
                            package: package.clone(),
                        },
                        ConversationEvent::MessageAppended { message },
                    ];
                    push_generating_change(&mut events, was_generating, state.generating());
                    self.publish(events);
                    package
                }
                Err(err) => {
                    drop(state);
                    return self.fail(cycle, Stage::Artifact, err).await;
                }
            }
        };

        tracing::info!(package_id = %package.id, file_name = %package.name, "Cycle completed");
        CycleOutcome::Completed { package }
    }

    /// Awaits a stage, applying the timeout and tagging errors with the stage.
    async fn guarded<T>(&self, stage: Stage, work: impl Future<Output = Result<T>>) -> Result<T> {
        let result = match self.stage_timeout {
            Some(limit) => match tokio::time::timeout(limit, work).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(ClaimClearError::Timeout {
                        stage,
                        after_ms: limit.as_millis() as u64,
                    });
                }
            },
            None => work.await,
        };

        result.map_err(|err| match err {
            ClaimClearError::GenerationFailed { .. } | ClaimClearError::Timeout { .. } => err,
            other => ClaimClearError::generation_failed(stage, other.to_string()),
        })
    }

    async fn fail(&self, cycle: CycleId, stage: Stage, err: ClaimClearError) -> CycleOutcome {
        tracing::warn!(error = %err, %stage, "Cycle failed");

        let mut state = self.state.write().await;
        let was_generating = state.generating();
        match state.apply_stage_failed(cycle, &self.templates.failure, Utc::now()) {
            Ok(message) => {
                let mut events = vec![ConversationEvent::MessageAppended { message }];
                push_generating_change(&mut events, was_generating, state.generating());
                events.push(ConversationEvent::CycleFailed {
                    cycle,
                    stage,
                    reason: err.to_string(),
                });
                self.publish(events);
            }
            Err(cleanup) => {
                tracing::error!(error = %cleanup, "Failed cycle was no longer active");
            }
        }
        drop(state);

        CycleOutcome::Failed(err)
    }

    /// Sends events in order. Callers hold the state write guard so the
    /// stream matches the order of the log.
    fn publish(&self, events: Vec<ConversationEvent>) {
        for event in events {
            // No subscribers is fine
            let _ = self.events.send(event);
        }
    }
}

fn push_generating_change(events: &mut Vec<ConversationEvent>, before: bool, after: bool) {
    if before != after {
        events.push(ConversationEvent::GeneratingChanged { generating: after });
    }
}
