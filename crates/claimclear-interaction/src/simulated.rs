//! Fixed-delay stand-ins for the assistant and document services.
//!
//! Each generator waits for its configured delay on the tokio clock and then
//! answers with canned output. Because they only use `tokio::time`, tests can
//! pause and advance the clock instead of sleeping for real.

use async_trait::async_trait;
use claimclear_core::Result;
use claimclear_core::config::RootConfig;
use claimclear_core::conversation::{
    ArtifactGenerator, GeneratedArtifact, GenerationRequest, ResponseGenerator,
};
use std::time::Duration;

/// Replies to every prompt with the same text after a fixed delay.
#[derive(Debug, Clone)]
pub struct CannedResponseGenerator {
    delay: Duration,
    content: String,
}

impl CannedResponseGenerator {
    pub fn new(delay: Duration, content: impl Into<String>) -> Self {
        Self {
            delay,
            content: content.into(),
        }
    }

    /// Builds the stage A generator described by the configuration.
    pub fn from_config(config: &RootConfig) -> Self {
        Self::new(config.orchestrator.response_delay, config.templates.analysis.clone())
    }
}

#[async_trait]
impl ResponseGenerator for CannedResponseGenerator {
    async fn respond(&self, request: &GenerationRequest) -> Result<String> {
        tracing::debug!(
            cycle = %request.cycle,
            delay_ms = self.delay.as_millis() as u64,
            "Simulating assistant response"
        );
        tokio::time::sleep(self.delay).await;
        Ok(self.content.clone())
    }
}

/// Pretends to render the evidence document after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedArtifactGenerator {
    delay: Duration,
    file_name: String,
}

impl SimulatedArtifactGenerator {
    pub fn new(delay: Duration, file_name: impl Into<String>) -> Self {
        Self {
            delay,
            file_name: file_name.into(),
        }
    }

    /// Builds the stage B generator described by the configuration.
    pub fn from_config(config: &RootConfig) -> Self {
        Self::new(config.orchestrator.artifact_delay, config.artifact.file_name.clone())
    }
}

#[async_trait]
impl ArtifactGenerator for SimulatedArtifactGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedArtifact> {
        tracing::debug!(
            cycle = %request.cycle,
            delay_ms = self.delay.as_millis() as u64,
            "Simulating evidence package generation"
        );
        tokio::time::sleep(self.delay).await;
        Ok(GeneratedArtifact {
            file_name: self.file_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use claimclear_core::conversation::{ANALYSIS_RESPONSE, CycleId, DEFAULT_ARTIFACT_NAME};
    use tokio::time::Instant;

    fn request() -> GenerationRequest {
        GenerationRequest {
            cycle: CycleId::new(1),
            prompt: "What is my treatment status?".to_string(),
            requested_at: Utc::now(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_waits_for_configured_delay() {
        let generator = CannedResponseGenerator::from_config(&RootConfig::default());
        let started = Instant::now();

        let content = generator.respond(&request()).await.unwrap();

        assert_eq!(content, ANALYSIS_RESPONSE);
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_artifact_waits_for_configured_delay() {
        let generator = SimulatedArtifactGenerator::from_config(&RootConfig::default());
        let started = Instant::now();

        let artifact = generator.generate(&request()).await.unwrap();

        assert_eq!(artifact.file_name, DEFAULT_ARTIFACT_NAME);
        assert!(started.elapsed() >= Duration::from_millis(3000));
    }
}
