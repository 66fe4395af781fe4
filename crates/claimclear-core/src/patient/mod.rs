//! Patient record domain module.
//!
//! # Module Structure
//!
//! - `model`: Record sections (`PatientRecord`, `Diagnosis`, `CurrentMedication`, ...)
//! - `repository`: Read-only repository trait
//! - `preset`: The built-in sample record
//!
//! # Usage
//!
//! ```ignore
//! use claimclear_core::patient::{PatientRecord, PatientRecordRepository, get_sample_record};
//! ```

mod model;
mod preset;
mod repository;

// Re-export public API
pub use model::{
    CurrentMedication, Diagnosis, HistoryEntry, MedicationEffectiveness, PastMedication,
    PatientProfile, PatientRecord,
};
pub use preset::get_sample_record;
pub use repository::PatientRecordRepository;
