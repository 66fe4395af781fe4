use super::evidence::{ArtifactReference, EvidencePackage};
use crate::error::Result;

/// Resolves an evidence package into something the caller can download.
///
/// How the file bytes are produced is outside the workflow; a store only
/// knows where a given package can be fetched from.
pub trait ArtifactStore: Send + Sync {
    fn reference_for(&self, package: &EvidencePackage) -> Result<ArtifactReference>;
}
