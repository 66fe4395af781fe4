//! Evidence package types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cycle::CycleId;

/// The downloadable claim-support document produced by a completed cycle.
///
/// At most one package exists per conversation. A newer completed cycle
/// replaces it; a package is never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidencePackage {
    /// Unique identifier (`ev-` followed by a UUID)
    pub id: String,
    /// File name presented to the patient
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Cycle whose stage B produced this package
    pub cycle: CycleId,
}

impl EvidencePackage {
    pub(crate) fn new(name: impl Into<String>, cycle: CycleId, created_at: DateTime<Utc>) -> Self {
        Self {
            id: format!("ev-{}", Uuid::new_v4().simple()),
            name: name.into(),
            created_at,
            cycle,
        }
    }
}

/// What the download action hands to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactReference {
    pub package_id: String,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
    /// Where the bytes can be fetched (`artifact://...`, `file://...`)
    pub location: String,
}
