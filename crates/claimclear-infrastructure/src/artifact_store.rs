//! Artifact store implementations.
//!
//! Both stores only compute where a package can be fetched from. Producing
//! the document bytes is the artifact generator's concern.

use claimclear_core::Result;
use claimclear_core::conversation::{ArtifactReference, ArtifactStore, EvidencePackage};
use std::path::PathBuf;

/// Keeps packages addressable by id only (`artifact://<id>/<name>`).
#[derive(Debug, Clone, Default)]
pub struct InMemoryArtifactStore;

impl ArtifactStore for InMemoryArtifactStore {
    fn reference_for(&self, package: &EvidencePackage) -> Result<ArtifactReference> {
        Ok(ArtifactReference {
            package_id: package.id.clone(),
            file_name: package.name.clone(),
            created_at: package.created_at,
            location: format!("artifact://{}/{}", package.id, package.name),
        })
    }
}

/// Resolves packages to files inside an output directory.
#[derive(Debug, Clone)]
pub struct DirectoryArtifactStore {
    root: PathBuf,
}

impl DirectoryArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path the package's file is expected at.
    pub fn path_for(&self, package: &EvidencePackage) -> PathBuf {
        self.root.join(&package.name)
    }
}

impl ArtifactStore for DirectoryArtifactStore {
    fn reference_for(&self, package: &EvidencePackage) -> Result<ArtifactReference> {
        Ok(ArtifactReference {
            package_id: package.id.clone(),
            file_name: package.name.clone(),
            created_at: package.created_at,
            location: format!("file://{}", self.path_for(package).display()),
        })
    }
}
