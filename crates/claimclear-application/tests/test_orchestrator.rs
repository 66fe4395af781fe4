use async_trait::async_trait;
use claimclear_application::{ConversationOrchestrator, CycleOutcome, DashboardService, Submission};
use claimclear_core::config::{CyclePolicy, RootConfig};
use claimclear_core::conversation::{
    ANALYSIS_RESPONSE, ArtifactGenerator, COMPLETION_RESPONSE, ConversationEvent,
    DEFAULT_ARTIFACT_NAME, FAILURE_RESPONSE, GREETING, GeneratedArtifact, GenerationRequest,
    MessageId, Sender, Stage,
};
use claimclear_core::{ClaimClearError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::sleep;

const QUESTION: &str = "What is my treatment status?";

fn config_with_policy(policy: CyclePolicy) -> RootConfig {
    let mut config = RootConfig::default();
    config.orchestrator.cycle_policy = policy;
    config
}

fn instant_config(policy: CyclePolicy) -> RootConfig {
    let mut config = config_with_policy(policy);
    config.orchestrator.response_delay = Duration::ZERO;
    config.orchestrator.artifact_delay = Duration::ZERO;
    config
}

fn orchestrator(policy: CyclePolicy) -> ConversationOrchestrator {
    ConversationOrchestrator::from_config(&config_with_policy(policy))
}

async fn accept(orchestrator: &ConversationOrchestrator, text: &str) -> claimclear_application::CycleTicket {
    orchestrator
        .submit(text)
        .await
        .expect("submission should succeed")
        .ticket()
        .expect("submission should be accepted")
}

fn drain(receiver: &mut broadcast::Receiver<ConversationEvent>) -> Vec<ConversationEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

struct BrokenArtifactGenerator;

#[async_trait]
impl ArtifactGenerator for BrokenArtifactGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<GeneratedArtifact> {
        sleep(Duration::from_millis(3000)).await;
        Err(ClaimClearError::generation_failed(
            Stage::Artifact,
            "document service unavailable",
        ))
    }
}

#[tokio::test(start_paused = true)]
async fn test_initial_state_is_greeting_only() {
    let orchestrator = orchestrator(CyclePolicy::Serial);
    let snapshot = orchestrator.current_state().await;

    assert_eq!(snapshot.messages.len(), 1);
    assert_eq!(snapshot.messages[0].id.as_str(), MessageId::GREETING);
    assert_eq!(snapshot.messages[0].content, GREETING);
    assert!(!snapshot.generating);
    assert!(snapshot.evidence_package.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_single_cycle_timeline() {
    let orchestrator = orchestrator(CyclePolicy::Serial);

    let ticket = accept(&orchestrator, QUESTION).await;
    let snapshot = orchestrator.current_state().await;
    assert_eq!(snapshot.messages.len(), 2);
    assert_eq!(snapshot.messages[1].sender, Sender::User);
    assert_eq!(snapshot.messages[1].content, QUESTION);
    assert_eq!(ticket.user_message, snapshot.messages[1]);
    assert!(!snapshot.generating);

    sleep(Duration::from_millis(1001)).await;
    let snapshot = orchestrator.current_state().await;
    assert_eq!(snapshot.messages.len(), 3);
    assert_eq!(snapshot.messages[2].sender, Sender::Assistant);
    assert_eq!(snapshot.messages[2].content, ANALYSIS_RESPONSE);
    assert!(snapshot.generating);
    assert!(snapshot.evidence_package.is_none());

    sleep(Duration::from_millis(3000)).await;
    let snapshot = orchestrator.current_state().await;
    assert_eq!(snapshot.messages.len(), 4);
    assert_eq!(snapshot.messages[3].content, COMPLETION_RESPONSE);
    assert!(!snapshot.generating);
    let package = snapshot.evidence_package.expect("package should be ready");
    assert_eq!(package.name, DEFAULT_ARTIFACT_NAME);
    assert_eq!(package.cycle, ticket.cycle);

    let outcome = ticket.wait().await.unwrap();
    assert_eq!(outcome.package(), Some(&package));
}

#[tokio::test(start_paused = true)]
async fn test_blank_submission_is_ignored() {
    let orchestrator = orchestrator(CyclePolicy::Serial);
    let mut events = orchestrator.subscribe();

    for blank in ["", "   ", "\n\t"] {
        let submission = orchestrator.submit(blank).await.unwrap();
        assert!(submission.is_ignored());
    }

    sleep(Duration::from_secs(10)).await;
    let snapshot = orchestrator.current_state().await;
    assert_eq!(snapshot.messages.len(), 1);
    assert!(!snapshot.generating);
    assert!(drain(&mut events).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_download_requires_completed_cycle() {
    let orchestrator = orchestrator(CyclePolicy::Serial);

    let err = orchestrator.download_artifact().await.unwrap_err();
    assert!(err.is_artifact_unavailable());

    let ticket = accept(&orchestrator, QUESTION).await;
    sleep(Duration::from_millis(2000)).await;
    assert!(
        orchestrator
            .download_artifact()
            .await
            .unwrap_err()
            .is_artifact_unavailable(),
        "still unavailable while generating"
    );

    ticket.wait().await.unwrap();
    let reference = orchestrator.download_artifact().await.unwrap();
    assert_eq!(reference.file_name, DEFAULT_ARTIFACT_NAME);
    assert!(reference.location.starts_with("artifact://ev-"));
}

#[tokio::test(start_paused = true)]
async fn test_events_follow_transitions() {
    let orchestrator = orchestrator(CyclePolicy::Serial);
    let mut events = orchestrator.subscribe();

    accept(&orchestrator, QUESTION).await.wait().await.unwrap();

    let events = drain(&mut events);
    assert_eq!(events.len(), 6);
    assert!(matches!(
        &events[0],
        ConversationEvent::MessageAppended { message } if message.sender == Sender::User
    ));
    assert!(matches!(
        &events[1],
        ConversationEvent::MessageAppended { message } if message.content == ANALYSIS_RESPONSE
    ));
    assert_eq!(
        events[2],
        ConversationEvent::GeneratingChanged { generating: true }
    );
    assert!(matches!(&events[3], ConversationEvent::PackageReady { .. }));
    assert!(matches!(
        &events[4],
        ConversationEvent::MessageAppended { message } if message.content == COMPLETION_RESPONSE
    ));
    assert_eq!(
        events[5],
        ConversationEvent::GeneratingChanged { generating: false }
    );
}

#[tokio::test(start_paused = true)]
async fn test_pending_input_submission() {
    let orchestrator = orchestrator(CyclePolicy::Serial);

    orchestrator.set_pending_input("   ").await;
    assert!(orchestrator.submit_pending().await.unwrap().is_ignored());
    assert_eq!(orchestrator.current_state().await.pending_input, "   ");

    orchestrator.set_pending_input(QUESTION).await;
    let ticket = orchestrator
        .submit_pending()
        .await
        .unwrap()
        .ticket()
        .expect("pending text should be accepted");

    let snapshot = orchestrator.current_state().await;
    assert_eq!(snapshot.pending_input, "");
    assert_eq!(ticket.user_message.content, QUESTION);
}

#[tokio::test(start_paused = true)]
async fn test_serial_cycles_do_not_interleave() {
    let orchestrator = orchestrator(CyclePolicy::Serial);
    let mut events = orchestrator.subscribe();

    let first = accept(&orchestrator, "first question").await;
    let second = accept(&orchestrator, "second question").await;

    let snapshot = orchestrator.current_state().await;
    assert_eq!(snapshot.messages.len(), 3);
    assert_eq!(snapshot.messages[1].content, "first question");
    assert_eq!(snapshot.messages[2].content, "second question");

    assert!(first.wait().await.unwrap().is_completed());
    let last = second.wait().await.unwrap();

    let snapshot = orchestrator.current_state().await;
    let assistant: Vec<_> = snapshot.messages[3..]
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(
        assistant,
        vec![
            ANALYSIS_RESPONSE,
            COMPLETION_RESPONSE,
            ANALYSIS_RESPONSE,
            COMPLETION_RESPONSE
        ]
    );
    assert_eq!(
        snapshot.evidence_package.as_ref().map(|p| p.cycle),
        Some(last.package().unwrap().cycle)
    );

    let ready: Vec<_> = drain(&mut events)
        .into_iter()
        .filter_map(|event| match event {
            ConversationEvent::PackageReady { package } => Some(package.cycle.value()),
            _ => None,
        })
        .collect();
    assert_eq!(ready, vec![1, 2]);
}

/// Submits from several tasks at once and checks that every appended message
/// is reported in the same order it was logged.
async fn assert_event_order_matches_log(policy: CyclePolicy) {
    const ROUNDS: usize = 25;
    const SUBMITTERS: usize = 10;

    for _ in 0..ROUNDS {
        let orchestrator = Arc::new(ConversationOrchestrator::from_config(&instant_config(policy)));
        let mut events = orchestrator.subscribe();

        let submitters: Vec<_> = (0..SUBMITTERS)
            .map(|n| {
                let orchestrator = Arc::clone(&orchestrator);
                tokio::spawn(async move { accept(&orchestrator, &format!("question {n}")).await })
            })
            .collect();
        for submitter in submitters {
            let ticket = submitter.await.unwrap();
            ticket.wait().await.unwrap();
        }

        let reported: Vec<MessageId> = drain(&mut events)
            .into_iter()
            .filter_map(|event| match event {
                ConversationEvent::MessageAppended { message } => Some(message.id),
                _ => None,
            })
            .collect();
        let logged: Vec<MessageId> = orchestrator.current_state().await.messages[1..]
            .iter()
            .map(|m| m.id.clone())
            .collect();

        assert_eq!(logged.len(), SUBMITTERS * 3);
        assert_eq!(reported, logged);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_cycles_report_messages_in_log_order() {
    assert_event_order_matches_log(CyclePolicy::Concurrent).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_overlapping_serial_cycles_report_messages_in_log_order() {
    assert_event_order_matches_log(CyclePolicy::Serial).await;
}

#[tokio::test(start_paused = true)]
async fn test_reject_policy_refuses_overlap() {
    let orchestrator = orchestrator(CyclePolicy::Reject);

    let first = accept(&orchestrator, "first question").await;
    orchestrator.set_pending_input("second question").await;

    let err = orchestrator.submit_pending().await.unwrap_err();
    assert_eq!(err, ClaimClearError::CycleInFlight { active: 1 });

    let snapshot = orchestrator.current_state().await;
    assert_eq!(snapshot.messages.len(), 2);
    assert_eq!(snapshot.pending_input, "second question");

    first.wait().await.unwrap();
    assert!(!orchestrator.submit_pending().await.unwrap().is_ignored());
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_policy_last_artifact_wins() {
    let orchestrator = orchestrator(CyclePolicy::Concurrent);

    let first = accept(&orchestrator, "first question").await;
    sleep(Duration::from_millis(500)).await;
    let second = accept(&orchestrator, "second question").await;

    first.wait().await.unwrap();
    let last = second.wait().await.unwrap();

    let snapshot = orchestrator.current_state().await;
    assert_eq!(snapshot.messages.len(), 7);
    assert_eq!(snapshot.messages[3].content, ANALYSIS_RESPONSE);
    assert_eq!(snapshot.messages[4].content, ANALYSIS_RESPONSE);
    assert_eq!(snapshot.messages[5].content, COMPLETION_RESPONSE);
    assert_eq!(snapshot.messages[6].content, COMPLETION_RESPONSE);
    assert_eq!(snapshot.evidence_package.as_ref(), last.package());
    assert!(!snapshot.generating);

    let ids: HashSet<_> = snapshot.messages.iter().map(|m| m.id.clone()).collect();
    assert_eq!(ids.len(), snapshot.messages.len());
}

#[tokio::test(start_paused = true)]
async fn test_failed_artifact_stage_recovers() {
    let orchestrator = ConversationOrchestrator::builder(&RootConfig::default())
        .artifact_generator(Arc::new(BrokenArtifactGenerator))
        .build();
    let mut events = orchestrator.subscribe();

    let outcome = accept(&orchestrator, QUESTION).await.wait().await.unwrap();

    let CycleOutcome::Failed(err) = outcome else {
        panic!("artifact stage should fail");
    };
    assert_eq!(err.stage(), Some(Stage::Artifact));

    let snapshot = orchestrator.current_state().await;
    assert_eq!(snapshot.messages.len(), 4);
    assert_eq!(snapshot.messages[3].sender, Sender::Assistant);
    assert_eq!(snapshot.messages[3].content, FAILURE_RESPONSE);
    assert!(!snapshot.generating);
    assert!(snapshot.evidence_package.is_none());
    assert!(snapshot.active_cycles.is_empty());
    assert!(
        orchestrator
            .download_artifact()
            .await
            .unwrap_err()
            .is_artifact_unavailable()
    );

    assert!(drain(&mut events).iter().any(|event| matches!(
        event,
        ConversationEvent::CycleFailed { stage: Stage::Artifact, .. }
    )));
}

#[tokio::test(start_paused = true)]
async fn test_stage_timeout_recovers() {
    let mut config = RootConfig::default();
    config.orchestrator.stage_timeout = Some(Duration::from_millis(2000));
    let orchestrator = ConversationOrchestrator::from_config(&config);

    let outcome = accept(&orchestrator, QUESTION).await.wait().await.unwrap();

    assert_eq!(
        outcome,
        CycleOutcome::Failed(ClaimClearError::Timeout {
            stage: Stage::Artifact,
            after_ms: 2000,
        })
    );
    let snapshot = orchestrator.current_state().await;
    assert!(!snapshot.generating);
    assert!(snapshot.evidence_package.is_none());
    assert_eq!(snapshot.last_message().unwrap().content, FAILURE_RESPONSE);
}

#[tokio::test(start_paused = true)]
async fn test_later_cycle_replaces_package() {
    let orchestrator = orchestrator(CyclePolicy::Serial);

    let first = accept(&orchestrator, "first question").await.wait().await.unwrap();
    let second = accept(&orchestrator, "second question").await.wait().await.unwrap();

    let current = orchestrator.current_state().await.evidence_package.unwrap();
    assert_ne!(first.package().unwrap().id, current.id);
    assert_eq!(second.package().unwrap().id, current.id);
    assert_eq!(orchestrator.download_artifact().await.unwrap().package_id, current.id);
}

#[tokio::test(start_paused = true)]
async fn test_dashboard_exposes_record_and_chat() {
    let dashboard = DashboardService::from_config(&RootConfig::default());

    let profile = dashboard.profile().await.unwrap();
    assert_eq!(profile.name, "Edward Fisher");
    assert_eq!(profile.patient_id, "P-78542");

    let record = dashboard.patient_record().await.unwrap();
    assert_eq!(record.profile, profile);

    let submission = dashboard.conversation().submit(QUESTION).await.unwrap();
    assert!(matches!(submission, Submission::Accepted(_)));
    assert_eq!(dashboard.conversation().current_state().await.messages.len(), 2);
}
