//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the root configuration
//! from the configuration file (`~/.config/claimclear/config.toml` unless
//! overridden).

use crate::dto::ConfigRootV1;
use crate::paths::ClaimClearPaths;
use claimclear_core::config::RootConfig;
use claimclear_core::{ClaimClearError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the root configuration.
///
/// A missing file is not an error: the defaults are returned instead. A
/// file that exists but cannot be read or parsed is reported to the caller.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// File the configuration is read from
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService for the default config file location.
    pub fn new() -> Result<Self> {
        let path = ClaimClearPaths::config_file().map_err(|e| ClaimClearError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a ConfigService reading from an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = Self::load_from_path(&self.path)?;

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    /// Reads and converts a config file. Missing or blank files yield defaults.
    pub fn load_from_path(path: &Path) -> Result<RootConfig> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(RootConfig::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ClaimClearError::config(format!("Failed to read config file at {:?}: {}", path, e))
        })?;

        if content.trim().is_empty() {
            return Ok(RootConfig::default());
        }

        let dto: ConfigRootV1 = toml::from_str(&content)?;
        let config = dto.into_domain()?;
        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Renders a configuration as the TOML document this service reads.
    pub fn render(config: &RootConfig) -> Result<String> {
        let dto = ConfigRootV1::from(config);
        Ok(toml::to_string_pretty(&dto)?)
    }
}
