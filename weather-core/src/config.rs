use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{Location, projection::FetchPolicy};

/// Credentials and endpoint for OpenWeather.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,

    /// Overrides the public endpoint, e.g. for a proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Location permissions the user has granted this tool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PermissionConfig {
    #[serde(default)]
    pub fine_location: bool,
    #[serde(default)]
    pub coarse_location: bool,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// fetch_policy = "last-write-wins"
///
/// [openweather]
/// api_key = "..."
///
/// [location]
/// latitude = 48.8566
/// longitude = 2.3522
///
/// [permissions]
/// fine_location = true
/// coarse_location = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub fetch_policy: FetchPolicy,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openweather: Option<ProviderConfig>,

    /// Fix reported when no coordinates are given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    #[serde(default)]
    pub permissions: PermissionConfig,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "minimal-weather", "minimal-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set or replace the OpenWeather API key, keeping any base URL override.
    pub fn set_api_key(&mut self, api_key: String) {
        match self.openweather.as_mut() {
            Some(provider) => provider.api_key = api_key,
            None => self.openweather = Some(ProviderConfig { api_key, base_url: None }),
        }
    }

    /// Has no effect until an API key is set.
    pub fn set_base_url(&mut self, base_url: String) {
        if let Some(provider) = self.openweather.as_mut() {
            provider.base_url = Some(base_url);
        }
    }

    pub fn provider_api_key(&self) -> Option<&str> {
        self.openweather.as_ref().map(|cfg| cfg.api_key.as_str())
    }

    pub fn provider_base_url(&self) -> Option<&str> {
        self.openweather.as_ref().and_then(|cfg| cfg.base_url.as_deref())
    }

    /// The API key, unless it is missing or blank.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.provider_api_key().map(str::trim).filter(|key| !key.is_empty())
    }

    pub fn is_provider_configured(&self) -> bool {
        self.usable_api_key().is_some()
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    pub fn grant_location_permissions(&mut self) {
        self.permissions = PermissionConfig { fine_location: true, coarse_location: true };
    }
}
