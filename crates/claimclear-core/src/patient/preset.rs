//! Built-in patient record.
//!
//! The dashboard ships with one fixed record so it can be demonstrated
//! without any data source configured.

use chrono::NaiveDate;

use super::model::{
    CurrentMedication, Diagnosis, HistoryEntry, MedicationEffectiveness, PastMedication,
    PatientProfile, PatientRecord,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn s(value: &str) -> String {
    value.to_string()
}

/// Returns the sample record shown when no record file is configured.
pub fn get_sample_record() -> PatientRecord {
    PatientRecord {
        profile: PatientProfile {
            name: s("Edward Fisher"),
            patient_id: s("P-78542"),
        },
        diagnoses: vec![
            Diagnosis {
                name: s("Cerebral Cavernous Malformation"),
                icd10: s("Q28.3"),
                date: date(2020, 3, 15),
            },
            Diagnosis {
                name: s("Epileptic Seizure"),
                icd10: s("G40.509"),
                date: date(2019, 11, 22),
            },
            Diagnosis {
                name: s("Intracranial Hemorrhage"),
                icd10: s("I62.9"),
                date: date(2020, 3, 15),
            },
        ],
        current_medications: vec![
            CurrentMedication {
                name: s("Carbamazepine"),
                dosage: s("1000mg"),
                frequency: s("Twice daily"),
                start_date: date(2020, 3, 20),
            },
            CurrentMedication {
                name: s("Lisinopril"),
                dosage: s("10mg"),
                frequency: s("Once daily"),
                start_date: date(2019, 12, 1),
            },
            CurrentMedication {
                name: s("Atorvastatin"),
                dosage: s("20mg"),
                frequency: s("Once daily at bedtime"),
                start_date: date(2020, 3, 20),
            },
        ],
        past_medications: vec![
            PastMedication {
                name: s("Glipizide"),
                dosage: s("5mg"),
                frequency: s("Once daily"),
                start_date: date(2020, 3, 20),
                end_date: date(2021, 5, 15),
                reason: s("Switched to Metformin due to better glycemic control"),
            },
            PastMedication {
                name: s("Hydrochlorothiazide"),
                dosage: s("25mg"),
                frequency: s("Once daily"),
                start_date: date(2019, 12, 1),
                end_date: date(2020, 2, 10),
                reason: s("Caused electrolyte imbalance"),
            },
        ],
        medical_history: vec![
            HistoryEntry {
                condition: s("Cerebral Cavernous Malformation"),
                notes: s("Diagnosed after MRI clinical features of venous lesions along the cerebellum."),
                date: date(2020, 3, 15),
            },
            HistoryEntry {
                condition: s("Epileptic Seizure"),
                notes: s("Patient experienced a witnessed tonic-clonic seizure consistent with epilepsy, confirmed by EEG findings and clinical history."),
                date: date(2019, 11, 22),
            },
            HistoryEntry {
                condition: s("Intracranial Hemorrhage"),
                notes: s("CT scan confirmed acute intracranial hemorrhage, with patient presenting neurological deficits consistent with the site of bleeding."),
                date: date(2010, 7, 8),
            },
        ],
        medication_effectiveness: vec![
            MedicationEffectiveness {
                medication: s("Carbamazepine"),
                effectiveness: s("Good glycemic control. HbA1c reduced from 7.8% to 6.5% within 6 months."),
                side_effects: s("Initial GI discomfort that resolved after 2 weeks"),
            },
            MedicationEffectiveness {
                medication: s("Lisinopril"),
                effectiveness: s("BP well-controlled at 125/78 mmHg"),
                side_effects: s("Occasional dry cough"),
            },
            MedicationEffectiveness {
                medication: s("Atorvastatin"),
                effectiveness: s("LDL reduced from 160 mg/dL to 95 mg/dL"),
                side_effects: s("None reported"),
            },
            MedicationEffectiveness {
                medication: s("Glipizide"),
                effectiveness: s("Moderate glycemic control. HbA1c reduced to 7.0%"),
                side_effects: s("Occasional hypoglycemic episodes"),
            },
            MedicationEffectiveness {
                medication: s("Hydrochlorothiazide"),
                effectiveness: s("Minimal BP reduction"),
                side_effects: s("Hypokalemia requiring supplementation"),
            },
        ],
    }
}
