//! Application layer for ClaimClear.
//!
//! This crate provides the use cases the front ends call: the evidence-package
//! chat workflow and the patient dashboard that hosts it.

pub mod dashboard;
pub mod orchestrator;

pub use claimclear_execution::CycleOutcome;
pub use dashboard::DashboardService;
pub use orchestrator::{ConversationOrchestrator, CycleTicket, OrchestratorBuilder, Submission};
