//! Cycle scheduling for ClaimClear.
//!
//! [`CycleExecutor`] carries a queued cycle through the response stage and
//! the artifact stage, recovering from generator failures and timeouts.
//! [`telemetry`] installs the log subscriber used by the binaries.

pub mod executor;
pub mod telemetry;

pub use executor::{CycleExecutor, CycleOutcome};
