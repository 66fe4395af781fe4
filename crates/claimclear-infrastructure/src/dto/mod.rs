//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the on-disk schema. They are private to the
//! infrastructure layer and keep file-format concerns (millisecond integers,
//! optional sections, schema version) out of the domain types.
//!
//! ## Schema Versioning (Semantic Versioning)
//!
//! - **MAJOR (X.0.0)**: Breaking changes (field removal, type changes)
//! - **MINOR (1.X.0)**: Backward-compatible additions (new optional fields)
//!
//! ### ConfigRoot Version History
//! - **1.0.0**: Orchestrator timings, templates, artifact, patient, logging

mod config_root;

pub use config_root::{
    ArtifactSectionV1, CONFIG_ROOT_VERSION, ConfigRootV1, LoggingSectionV1,
    OrchestratorSectionV1, PatientSectionV1,
};
