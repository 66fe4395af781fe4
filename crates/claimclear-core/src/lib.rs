//! Domain layer for ClaimClear.
//!
//! This crate holds the storage- and runtime-agnostic pieces of the patient
//! dashboard: the chat workflow state machine that produces an evidence
//! package, the read-only patient record, and the configuration model.

pub mod config;
pub mod conversation;
pub mod error;
pub mod patient;

// Re-export common error type
pub use error::{ClaimClearError, Result};
