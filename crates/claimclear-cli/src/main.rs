use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use claimclear_core::config::{LogFormat, RootConfig};
use claimclear_execution::telemetry;
use claimclear_infrastructure::ConfigService;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "claimclear")]
#[command(about = "ClaimClear - patient record dashboard and evidence package assistant", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to ~/.config/claimclear/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level filter, overriding the config file
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the patient profile and medical record tables
    Record,
    /// Start an interactive chat with the evidence assistant
    Chat,
    /// Ask a single question and print the resulting transcript
    Ask {
        /// Question to submit
        text: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Show the config file location and the effective configuration
    Config,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let service = match &cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new().context("Failed to resolve config location")?,
    };
    let mut config: RootConfig = service
        .get_config()
        .with_context(|| format!("Failed to load {}", service.path().display()))?;

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.json {
        config.logging.format = LogFormat::Json;
    }
    telemetry::init_tracing(&config.logging);
    tracing::debug!(path = %service.path().display(), "Configuration loaded");

    match cli.command {
        Commands::Record => commands::record::show(&config).await?,
        Commands::Chat => commands::chat::run(&config).await?,
        Commands::Ask { text, output } => commands::ask::run(&config, &text, output).await?,
        Commands::Config => commands::config::show(&service, &config)?,
    }

    Ok(())
}
