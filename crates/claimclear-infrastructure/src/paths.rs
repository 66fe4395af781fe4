//! Unified path management for ClaimClear configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/claimclear/        # Config directory (platform default via `dirs`)
//! └── config.toml              # Application configuration
//! ```
//!
//! `CLAIMCLEAR_CONFIG` overrides the config file location.

use std::path::PathBuf;

const APP_DIR: &str = "claimclear";

/// Environment variable that points at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "CLAIMCLEAR_CONFIG";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for ClaimClear.
pub struct ClaimClearPaths;

impl ClaimClearPaths {
    /// Returns the ClaimClear configuration directory (e.g. `~/.config/claimclear/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    ///
    /// Honors `CLAIMCLEAR_CONFIG` when it is set to a non-empty value.
    pub fn config_file() -> Result<PathBuf, PathError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_is_app_scoped() {
        if let Ok(dir) = ClaimClearPaths::config_dir() {
            assert!(dir.ends_with(APP_DIR));
        }
    }
}
