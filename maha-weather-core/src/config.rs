use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::registry::{self, City};

/// Settings for the Open-Meteo provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// API root, e.g. `https://api.open-meteo.com/v1`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout; absent means the HTTP client's own default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default = "default_past_days")]
    pub past_days: u8,

    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_past_days() -> u8 {
    2
}

const fn default_forecast_days() -> u8 {
    7
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            past_days: default_past_days(),
            forecast_days: default_forecast_days(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_city = "pune"
///
/// [provider]
/// base_url = "https://api.open-meteo.com/v1"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Registry id of the city shown when none is given on the command line.
    pub default_city: Option<String>,

    #[serde(default)]
    pub provider: ProviderSettings,
}

impl Config {
    /// Return the configured default city, resolved through the registry.
    pub fn default_city(&self) -> Result<&'static City> {
        let id = self.default_city.as_deref().ok_or_else(|| {
            anyhow!(
                "No default city configured.\n\
                 Hint: pass a city id (see `maha-weather cities`) or run `maha-weather configure`."
            )
        })?;

        registry::resolve(id).ok_or_else(|| {
            anyhow!(
                "Configured default city '{id}' is not a known city.\n\
                 Hint: run `maha-weather configure` to pick a new one."
            )
        })
    }

    /// Store the default city after checking it against the registry.
    pub fn set_default_city(&mut self, id: &str) -> Result<()> {
        let city = registry::resolve(id).ok_or_else(|| {
            anyhow!("Unknown city '{id}'. Run `maha-weather cities` to list supported ids.")
        })?;
        self.default_city = Some(city.id.to_string());
        Ok(())
    }

    /// Load config from the platform location, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform location, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
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
        let dirs = ProjectDirs::from("dev", "maha-weather", "maha-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
