//! Patient record domain model.
//!
//! The record is read-only from the workflow's point of view: the dashboard
//! renders it, nothing writes back into it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identity shown in the dashboard header.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PatientProfile {
    /// Display name of the patient
    pub name: String,
    /// External patient identifier (e.g. `P-78542`)
    pub patient_id: String,
}

impl PatientProfile {
    /// Initials used as the avatar label for the patient's chat bubbles.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    pub name: String,
    /// ICD-10 diagnostic code
    pub icd10: String,
    pub date: NaiveDate,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CurrentMedication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: NaiveDate,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PastMedication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Why the medication was discontinued
    pub reason: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub condition: String,
    pub notes: String,
    pub date: NaiveDate,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MedicationEffectiveness {
    pub medication: String,
    pub effectiveness: String,
    pub side_effects: String,
}

/// The complete record displayed on the medical-data tab.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PatientRecord {
    pub profile: PatientProfile,
    #[serde(default)]
    pub diagnoses: Vec<Diagnosis>,
    #[serde(default)]
    pub current_medications: Vec<CurrentMedication>,
    #[serde(default)]
    pub past_medications: Vec<PastMedication>,
    #[serde(default)]
    pub medical_history: Vec<HistoryEntry>,
    #[serde(default)]
    pub medication_effectiveness: Vec<MedicationEffectiveness>,
}

impl PatientRecord {
    /// Looks up the effectiveness notes for a medication by name.
    pub fn effectiveness_of(&self, medication: &str) -> Option<&MedicationEffectiveness> {
        self.medication_effectiveness
            .iter()
            .find(|entry| entry.medication.eq_ignore_ascii_case(medication))
    }
}
