//! Application configuration management.
//!
//! This module handles loading and saving the data-layer configuration:
//! backend base URL, request timeout, cache key prefix and the cache TTL of
//! each entity type.
//!
//! Configuration is stored at `~/.config/clinicdesk/config.json`. Missing
//! keys fall back to their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "clinicdesk";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub cache_prefix: String,
    pub patients_cache_ttl_secs: u64,
    pub dentists_cache_ttl_secs: u64,
    pub dental_plans_cache_ttl_secs: u64,
    pub evolutions_cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 10,
            cache_prefix: APP_NAME.to_string(),
            patients_cache_ttl_secs: 120,
            dentists_cache_ttl_secs: 300,
            dental_plans_cache_ttl_secs: 120,
            evolutions_cache_ttl_secs: 120,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for file-backed cache storage.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn patients_ttl(&self) -> Duration {
        Duration::from_secs(self.patients_cache_ttl_secs)
    }

    pub fn dentists_ttl(&self) -> Duration {
        Duration::from_secs(self.dentists_cache_ttl_secs)
    }

    pub fn dental_plans_ttl(&self) -> Duration {
        Duration::from_secs(self.dental_plans_cache_ttl_secs)
    }

    pub fn evolutions_ttl(&self) -> Duration {
        Duration::from_secs(self.evolutions_cache_ttl_secs)
    }
}
