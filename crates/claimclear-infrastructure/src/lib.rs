pub mod artifact_store;
pub mod config_service;
pub mod dto;
pub mod paths;
pub mod patient_record_repository;

pub use crate::artifact_store::{DirectoryArtifactStore, InMemoryArtifactStore};
pub use crate::config_service::ConfigService;
pub use crate::patient_record_repository::{
    SamplePatientRecordRepository, TomlPatientRecordRepository, patient_record_repository,
};
