use claimclear_core::Result;
use claimclear_core::config::RootConfig;
use claimclear_core::patient::{PatientProfile, PatientRecord, PatientRecordRepository};
use claimclear_infrastructure::patient_record_repository;
use std::sync::Arc;

use crate::orchestrator::ConversationOrchestrator;

/// The patient dashboard: a read-only record next to the evidence chat.
pub struct DashboardService {
    records: Arc<dyn PatientRecordRepository>,
    conversation: Arc<ConversationOrchestrator>,
}

impl DashboardService {
    pub fn new(
        records: Arc<dyn PatientRecordRepository>,
        conversation: Arc<ConversationOrchestrator>,
    ) -> Self {
        Self {
            records,
            conversation,
        }
    }

    /// Wires the record source and the chat workflow from configuration.
    pub fn from_config(config: &RootConfig) -> Self {
        let records = patient_record_repository(config.patient.record_path.as_deref());
        let conversation = Arc::new(ConversationOrchestrator::from_config(config));
        Self::new(records, conversation)
    }

    pub async fn patient_record(&self) -> Result<PatientRecord> {
        self.records.load().await
    }

    /// Header data shown above the record tables.
    pub async fn profile(&self) -> Result<PatientProfile> {
        Ok(self.records.load().await?.profile)
    }

    pub fn conversation(&self) -> &Arc<ConversationOrchestrator> {
        &self.conversation
    }
}
