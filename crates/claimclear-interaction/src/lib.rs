//! External service adapters for ClaimClear.
//!
//! The assistant and the document generator are external services. This
//! crate implements the generator traits from `claimclear-core` for them;
//! today only the simulated, fixed-delay versions exist.

pub mod simulated;

pub use simulated::{CannedResponseGenerator, SimulatedArtifactGenerator};
