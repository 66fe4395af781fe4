use anyhow::{Context, Result};
use claimclear_application::DashboardService;
use claimclear_core::config::RootConfig;
use colored::Colorize;

use super::render::{format_profile, format_record_sections};

/// Prints the profile header followed by every record table.
pub async fn show(config: &RootConfig) -> Result<()> {
    let dashboard = DashboardService::from_config(config);
    let record = dashboard
        .patient_record()
        .await
        .context("Failed to load patient record")?;

    println!("{}", format_profile(&record.profile).bright_white().bold());
    println!();

    for (title, table) in format_record_sections(&record) {
        println!("{}", title.bright_cyan().bold());
        println!("{}", table);
        println!();
    }

    Ok(())
}
