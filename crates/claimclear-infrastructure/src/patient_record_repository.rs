//! Patient record repository implementations.

use async_trait::async_trait;
use claimclear_core::patient::{PatientRecord, PatientRecordRepository, get_sample_record};
use claimclear_core::{ClaimClearError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Serves the built-in sample record.
#[derive(Debug, Clone, Default)]
pub struct SamplePatientRecordRepository;

#[async_trait]
impl PatientRecordRepository for SamplePatientRecordRepository {
    async fn load(&self) -> Result<PatientRecord> {
        Ok(get_sample_record())
    }
}

/// Reads a patient record from a TOML file.
///
/// The file layout mirrors [`PatientRecord`]: a `[profile]` table followed by
/// `[[diagnoses]]`, `[[current_medications]]`, `[[past_medications]]`,
/// `[[medical_history]]` and `[[medication_effectiveness]]` arrays.
#[derive(Debug, Clone)]
pub struct TomlPatientRecordRepository {
    path: PathBuf,
}

impl TomlPatientRecordRepository {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes a record in the format this repository reads.
    pub fn render(record: &PatientRecord) -> Result<String> {
        Ok(toml::to_string_pretty(record)?)
    }
}

#[async_trait]
impl PatientRecordRepository for TomlPatientRecordRepository {
    async fn load(&self) -> Result<PatientRecord> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ClaimClearError::not_found(
                    "patient record",
                    self.path.display().to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        let record: PatientRecord = toml::from_str(&content)?;
        tracing::debug!(
            "Loaded patient record for {} from {:?}",
            record.profile.patient_id,
            self.path
        );
        Ok(record)
    }
}

/// Picks the repository matching the configured record path.
pub fn patient_record_repository(record_path: Option<&Path>) -> Arc<dyn PatientRecordRepository> {
    match record_path {
        Some(path) => Arc::new(TomlPatientRecordRepository::with_path(path)),
        None => Arc::new(SamplePatientRecordRepository),
    }
}
