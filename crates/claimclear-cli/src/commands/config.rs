use anyhow::Result;
use claimclear_core::config::RootConfig;
use claimclear_infrastructure::ConfigService;
use colored::Colorize;

/// Prints where the config lives and the configuration in effect.
///
/// Command-line overrides (log level, JSON logs) are already folded into
/// `config`, so the output can differ from the file on disk.
pub fn show(service: &ConfigService, config: &RootConfig) -> Result<()> {
    let path = service.path();
    let status = if path.exists() { "" } else { " (not found, using defaults)" };

    println!("{} {}{}", "Config file:".bright_black(), path.display(), status.yellow());
    println!();
    print!("{}", ConfigService::render(config)?);

    Ok(())
}
