//! Application configuration domain model.
//!
//! These types are storage-agnostic; the infrastructure layer maps the TOML
//! file onto them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::conversation::{DEFAULT_ARTIFACT_NAME, ResponseTemplates};
use crate::error::ClaimClearError;

/// Reference delay of stage A.
pub const DEFAULT_RESPONSE_DELAY: Duration = Duration::from_millis(1000);
/// Reference delay of stage B.
pub const DEFAULT_ARTIFACT_DELAY: Duration = Duration::from_millis(3000);
/// Upper bound applied to each stage unless disabled.
pub const DEFAULT_STAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// How a submission behaves while another cycle is still in flight.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Cycles run one after another in submission order.
    #[default]
    Serial,
    /// Cycles run independently; the last stage B to finish owns the package.
    Concurrent,
    /// New submissions are refused until the active cycle finishes.
    Reject,
}

impl fmt::Display for CyclePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CyclePolicy::Serial => "serial",
            CyclePolicy::Concurrent => "concurrent",
            CyclePolicy::Reject => "reject",
        };
        f.write_str(label)
    }
}

impl FromStr for CyclePolicy {
    type Err = ClaimClearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serial" => Ok(CyclePolicy::Serial),
            "concurrent" => Ok(CyclePolicy::Concurrent),
            "reject" => Ok(CyclePolicy::Reject),
            other => Err(ClaimClearError::config(format!(
                "unknown cycle policy '{}' (expected serial, concurrent or reject)",
                other
            ))),
        }
    }
}

/// Output format of the log subscriber.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Timing and scheduling of the chat workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    pub response_delay: Duration,
    pub artifact_delay: Duration,
    /// `None` disables the per-stage timeout.
    pub stage_timeout: Option<Duration>,
    pub cycle_policy: CyclePolicy,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            response_delay: DEFAULT_RESPONSE_DELAY,
            artifact_delay: DEFAULT_ARTIFACT_DELAY,
            stage_timeout: Some(DEFAULT_STAGE_TIMEOUT),
            cycle_policy: CyclePolicy::default(),
        }
    }
}

/// Naming and placement of the generated package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactConfig {
    pub file_name: String,
    /// Directory downloads resolve into. `None` keeps packages in memory.
    pub output_dir: Option<PathBuf>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_ARTIFACT_NAME.to_string(),
            output_dir: None,
        }
    }
}

/// Where the patient record comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatientConfig {
    /// TOML record file. `None` uses the built-in sample record.
    pub record_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

/// The complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RootConfig {
    pub orchestrator: OrchestratorConfig,
    pub templates: ResponseTemplates,
    pub artifact: ArtifactConfig,
    pub patient: PatientConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_timings() {
        let config = RootConfig::default();

        assert_eq!(config.orchestrator.response_delay, Duration::from_millis(1000));
        assert_eq!(config.orchestrator.artifact_delay, Duration::from_millis(3000));
        assert_eq!(config.orchestrator.cycle_policy, CyclePolicy::Serial);
        assert_eq!(config.artifact.file_name, "ClaimClear_Evidence_Package.pdf");
        assert!(config.patient.record_path.is_none());
    }

    #[test]
    fn test_cycle_policy_from_str() {
        assert_eq!("Concurrent".parse::<CyclePolicy>().unwrap(), CyclePolicy::Concurrent);
        assert_eq!(" reject ".parse::<CyclePolicy>().unwrap(), CyclePolicy::Reject);
        assert!("parallel".parse::<CyclePolicy>().unwrap_err().is_config());
    }
}
