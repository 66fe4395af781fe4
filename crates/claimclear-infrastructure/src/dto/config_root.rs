//! ConfigRoot DTOs
//!
//! Maps `config.toml` onto [`RootConfig`]. Every section and every field is
//! optional; anything left out falls back to the domain defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use claimclear_core::config::{
    ArtifactConfig, CyclePolicy, LogFormat, LoggingConfig, OrchestratorConfig, PatientConfig,
    RootConfig,
};
use claimclear_core::conversation::ResponseTemplates;
use claimclear_core::{ClaimClearError, Result};

/// Current schema version written by [`ConfigRootV1::from`].
pub const CONFIG_ROOT_VERSION: &str = "1.0.0";

fn default_version() -> String {
    CONFIG_ROOT_VERSION.to_string()
}

// ============================================================================
// Section DTOs
// ============================================================================

/// `[orchestrator]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorSectionV1 {
    pub response_delay_ms: u64,
    pub artifact_delay_ms: u64,
    /// `0` disables the timeout.
    pub stage_timeout_ms: u64,
    pub cycle_policy: CyclePolicy,
}

impl Default for OrchestratorSectionV1 {
    fn default() -> Self {
        (&OrchestratorConfig::default()).into()
    }
}

/// `[artifact]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactSectionV1 {
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for ArtifactSectionV1 {
    fn default() -> Self {
        let domain = ArtifactConfig::default();
        Self {
            file_name: domain.file_name,
            output_dir: domain.output_dir,
        }
    }
}

/// `[patient]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientSectionV1 {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_path: Option<PathBuf>,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSectionV1 {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSectionV1 {
    fn default() -> Self {
        let domain = LoggingConfig::default();
        Self {
            level: domain.level,
            format: domain.format,
        }
    }
}

/// Root configuration structure V1 for `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRootV1 {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub orchestrator: OrchestratorSectionV1,
    #[serde(default)]
    pub templates: ResponseTemplates,
    #[serde(default)]
    pub artifact: ArtifactSectionV1,
    #[serde(default)]
    pub patient: PatientSectionV1,
    #[serde(default)]
    pub logging: LoggingSectionV1,
}

impl Default for ConfigRootV1 {
    fn default() -> Self {
        (&RootConfig::default()).into()
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl ConfigRootV1 {
    /// Validates the schema version and converts into the domain model.
    pub fn into_domain(self) -> Result<RootConfig> {
        let major = self.version.split('.').next().unwrap_or_default();
        if major != "1" {
            return Err(ClaimClearError::config(format!(
                "unsupported config version '{}' (expected 1.x)",
                self.version
            )));
        }

        Ok(RootConfig {
            orchestrator: self.orchestrator.into(),
            templates: self.templates,
            artifact: ArtifactConfig {
                file_name: self.artifact.file_name,
                output_dir: self.artifact.output_dir,
            },
            patient: PatientConfig {
                record_path: self.patient.record_path,
            },
            logging: LoggingConfig {
                level: self.logging.level,
                format: self.logging.format,
            },
        })
    }
}

impl From<OrchestratorSectionV1> for OrchestratorConfig {
    fn from(dto: OrchestratorSectionV1) -> Self {
        OrchestratorConfig {
            response_delay: Duration::from_millis(dto.response_delay_ms),
            artifact_delay: Duration::from_millis(dto.artifact_delay_ms),
            stage_timeout: (dto.stage_timeout_ms > 0)
                .then(|| Duration::from_millis(dto.stage_timeout_ms)),
            cycle_policy: dto.cycle_policy,
        }
    }
}

/// Convert domain model to DTO for display and persistence.
impl From<&OrchestratorConfig> for OrchestratorSectionV1 {
    fn from(config: &OrchestratorConfig) -> Self {
        OrchestratorSectionV1 {
            response_delay_ms: config.response_delay.as_millis() as u64,
            artifact_delay_ms: config.artifact_delay.as_millis() as u64,
            stage_timeout_ms: config
                .stage_timeout
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0),
            cycle_policy: config.cycle_policy,
        }
    }
}

/// Convert domain model to DTO for display and persistence.
impl From<&RootConfig> for ConfigRootV1 {
    fn from(config: &RootConfig) -> Self {
        ConfigRootV1 {
            version: default_version(),
            orchestrator: (&config.orchestrator).into(),
            templates: config.templates.clone(),
            artifact: ArtifactSectionV1 {
                file_name: config.artifact.file_name.clone(),
                output_dir: config.artifact.output_dir.clone(),
            },
            patient: PatientSectionV1 {
                record_path: config.patient.record_path.clone(),
            },
            logging: LoggingSectionV1 {
                level: config.logging.level.clone(),
                format: config.logging.format,
            },
        }
    }
}
