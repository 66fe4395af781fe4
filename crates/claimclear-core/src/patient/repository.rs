//! Patient record repository trait.
//!
//! Defines the read-only interface the dashboard uses to obtain a record.

use super::model::PatientRecord;
use crate::error::Result;

/// An abstract source of the patient record.
///
/// This trait decouples the dashboard from where the record lives (built-in
/// fixture, TOML file, remote EHR API). It exposes no write
/// operation.
#[async_trait::async_trait]
pub trait PatientRecordRepository: Send + Sync {
    /// Loads the patient record.
    ///
    /// # Returns
    ///
    /// - `Ok(PatientRecord)`: The record to display
    /// - `Err(ClaimClearError)`: Error if the source cannot be read or parsed
    async fn load(&self) -> Result<PatientRecord>;
}
