//! Terminal rendering shared by the commands.
//!
//! The `format_*` functions build plain text and are what the tests look at;
//! the `print_*` functions add colour on top.

use chrono::{DateTime, Local, Utc};
use claimclear_core::conversation::{
    ArtifactReference, ConversationEvent, ConversationSnapshot, EvidencePackage,
    GENERATING_INDICATOR, Message, Sender,
};
use claimclear_core::patient::{PatientProfile, PatientRecord};
use colored::Colorize;

/// Avatar label of the assistant's bubbles.
pub const ASSISTANT_LABEL: &str = "CC";

pub fn sender_label(sender: Sender, user_initials: &str) -> &str {
    match sender {
        Sender::Assistant => ASSISTANT_LABEL,
        Sender::User => user_initials,
    }
}

fn clock(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M").to_string()
}

/// One chat bubble: a header line followed by the indented content.
pub fn format_message(message: &Message, user_initials: &str) -> String {
    let mut out = format!(
        "[{}] {}",
        sender_label(message.sender, user_initials),
        clock(&message.timestamp)
    );
    for line in message.content.lines() {
        out.push_str("\n    ");
        out.push_str(line);
    }
    out
}

pub fn format_artifact_card(package: &EvidencePackage) -> String {
    format!(
        "+-- Evidence package ready\n|   {}\n|   generated {}\n+-- type /download to get it",
        package.name,
        clock(&package.created_at)
    )
}

pub fn format_reference(reference: &ArtifactReference) -> String {
    format!("{} -> {}", reference.file_name, reference.location)
}

pub fn format_state(snapshot: &ConversationSnapshot) -> String {
    let package = snapshot
        .evidence_package
        .as_ref()
        .map(|p| format!("{} ({})", p.name, p.id))
        .unwrap_or_else(|| "none".to_string());
    let cycles = snapshot
        .active_cycles
        .iter()
        .map(|c| format!("{} {}", c.id, c.phase))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "phase:    {}\nmessages: {}\npackage:  {}\ncycles:   {}",
        snapshot.phase(),
        snapshot.messages.len(),
        package,
        if cycles.is_empty() { "none" } else { cycles.as_str() }
    )
}

pub fn format_profile(profile: &PatientProfile) -> String {
    format!("{}  (Patient ID: {})", profile.name, profile.patient_id)
}

/// Lays out rows under a header with columns padded to the widest cell.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render_row(headers.to_vec())];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(render_row(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}

/// The five record sections, each as a titled table.
pub fn format_record_sections(record: &PatientRecord) -> Vec<(&'static str, String)> {
    let date = |d: &chrono::NaiveDate| d.format("%Y-%m-%d").to_string();

    vec![
        (
            "Diagnoses",
            format_table(
                &["Diagnosis", "ICD-10", "Date"],
                &record
                    .diagnoses
                    .iter()
                    .map(|d| vec![d.name.clone(), d.icd10.clone(), date(&d.date)])
                    .collect::<Vec<_>>(),
            ),
        ),
        (
            "Current Medications",
            format_table(
                &["Medication", "Dosage", "Frequency", "Start Date"],
                &record
                    .current_medications
                    .iter()
                    .map(|m| {
                        vec![
                            m.name.clone(),
                            m.dosage.clone(),
                            m.frequency.clone(),
                            date(&m.start_date),
                        ]
                    })
                    .collect::<Vec<_>>(),
            ),
        ),
        (
            "Past Medications",
            format_table(
                &["Medication", "Dosage", "Frequency", "Start", "End", "Reason"],
                &record
                    .past_medications
                    .iter()
                    .map(|m| {
                        vec![
                            m.name.clone(),
                            m.dosage.clone(),
                            m.frequency.clone(),
                            date(&m.start_date),
                            date(&m.end_date),
                            m.reason.clone(),
                        ]
                    })
                    .collect::<Vec<_>>(),
            ),
        ),
        (
            "Medical History",
            format_table(
                &["Condition", "Notes", "Date"],
                &record
                    .medical_history
                    .iter()
                    .map(|h| vec![h.condition.clone(), h.notes.clone(), date(&h.date)])
                    .collect::<Vec<_>>(),
            ),
        ),
        (
            "Medication Effectiveness",
            format_table(
                &["Medication", "Effectiveness", "Side Effects"],
                &record
                    .medication_effectiveness
                    .iter()
                    .map(|e| {
                        vec![
                            e.medication.clone(),
                            e.effectiveness.clone(),
                            e.side_effects.clone(),
                        ]
                    })
                    .collect::<Vec<_>>(),
            ),
        ),
    ]
}

pub fn print_message(message: &Message, user_initials: &str) {
    let text = format_message(message, user_initials);
    match message.sender {
        Sender::Assistant => println!("{}", text.bright_blue()),
        Sender::User => println!("{}", text.green()),
    }
    println!();
}

pub fn print_artifact_card(package: &EvidencePackage) {
    println!("{}", format_artifact_card(package).bright_magenta());
    println!();
}

/// Echoes one conversation event to the terminal.
pub fn print_event(event: &ConversationEvent, user_initials: &str) {
    match event {
        ConversationEvent::MessageAppended { message } => print_message(message, user_initials),
        ConversationEvent::GeneratingChanged { generating: true } => {
            println!("{}", GENERATING_INDICATOR.yellow().italic());
        }
        ConversationEvent::GeneratingChanged { generating: false } => {}
        ConversationEvent::PackageReady { package } => print_artifact_card(package),
        ConversationEvent::CycleFailed { cycle, reason, .. } => {
            eprintln!("{}", format!("Cycle {} failed: {}", cycle, reason).red());
        }
    }
}
