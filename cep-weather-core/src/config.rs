use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_VIA_CEP_URL: &str = "https://viacep.com.br/ws/{cep}/json/";
pub const DEFAULT_WEATHER_BASE_URL: &str = "http://api.weatherapi.com/v1/current.json";

pub const ENV_VIA_CEP_URL: &str = "VIA_CEP_BASE_URL";
pub const ENV_WEATHER_BASE_URL: &str = "WEATHER_BASE_URL";
pub const ENV_WEATHER_API_KEY: &str = "WEATHER_API_KEY";

/// Upstream endpoints and credentials.
///
/// Example TOML:
/// ```toml
/// via_cep_url = "https://viacep.com.br/ws/{cep}/json/"
/// weather_base_url = "http://api.weatherapi.com/v1/current.json"
/// weather_api_key = "..."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ViaCEP URL template; `{cep}` is replaced by the looked-up code.
    pub via_cep_url: String,

    /// WeatherAPI `current.json` endpoint.
    pub weather_base_url: String,

    pub weather_api_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            via_cep_url: DEFAULT_VIA_CEP_URL.to_string(),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            weather_api_key: String::new(),
        }
    }
}

impl Config {
    /// Load config from disk (or defaults when absent), then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        Ok(Self::load_file()?.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cep-weather", "cep-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Override fields from `lookup` (normally the process environment).
    /// Empty values are ignored.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(url) = get(ENV_VIA_CEP_URL) {
            self.via_cep_url = url;
        }
        if let Some(url) = get(ENV_WEATHER_BASE_URL) {
            self.weather_base_url = url;
        }
        if let Some(key) = get(ENV_WEATHER_API_KEY) {
            self.weather_api_key = key;
        }

        self
    }

    pub fn has_weather_api_key(&self) -> bool {
        !self.weather_api_key.is_empty()
    }
}
