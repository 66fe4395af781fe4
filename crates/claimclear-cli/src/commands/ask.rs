use anyhow::{Context, Result, bail};
use claimclear_application::{CycleOutcome, DashboardService, Submission};
use claimclear_core::config::RootConfig;
use claimclear_core::conversation::{ArtifactReference, EvidencePackage, Message};
use colored::Colorize;
use serde::Serialize;

use super::render::{format_reference, print_artifact_card, print_message};
use crate::OutputFormat;

/// Machine-readable result of `claimclear ask --output json`.
#[derive(Debug, Serialize)]
struct AskReport {
    completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    messages: Vec<Message>,
    evidence_package: Option<EvidencePackage>,
    artifact: Option<ArtifactReference>,
}

/// Runs one full cycle for `text` and prints the transcript.
pub async fn run(config: &RootConfig, text: &str, output: OutputFormat) -> Result<()> {
    let dashboard = DashboardService::from_config(config);
    let conversation = dashboard.conversation();

    let ticket = match conversation.submit(text).await? {
        Submission::Accepted(ticket) => ticket,
        Submission::Ignored => bail!("Nothing to ask: the question is blank"),
    };
    tracing::debug!(cycle = ticket.cycle.value(), "Waiting for cycle");

    let outcome = ticket.wait().await?;
    let snapshot = conversation.current_state().await;
    let artifact = match &outcome {
        CycleOutcome::Completed { .. } => Some(conversation.download_artifact().await?),
        CycleOutcome::Failed(_) => None,
    };

    match output {
        OutputFormat::Json => {
            let report = AskReport {
                completed: outcome.is_completed(),
                error: match &outcome {
                    CycleOutcome::Failed(err) => Some(err.to_string()),
                    CycleOutcome::Completed { .. } => None,
                },
                messages: snapshot.messages,
                evidence_package: snapshot.evidence_package,
                artifact,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to encode transcript")?
            );
        }
        OutputFormat::Text => {
            let initials = dashboard.profile().await?.initials();
            for message in &snapshot.messages {
                print_message(message, &initials);
            }
            if let Some(package) = &snapshot.evidence_package {
                print_artifact_card(package);
            }
            match (&outcome, &artifact) {
                (CycleOutcome::Failed(err), _) => {
                    eprintln!("{}", format!("Cycle failed: {}", err).red());
                }
                (_, Some(reference)) => println!("{}", format_reference(reference).bright_black()),
                _ => {}
            }
        }
    }

    Ok(())
}
