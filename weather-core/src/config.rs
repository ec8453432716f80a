use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{DisplayUnit, WeatherError, location::DEFAULT_COUNTRIES_URL};

/// Environment variable holding the OpenWeather API key. Takes precedence
/// over the config file.
pub const API_KEY_ENV: &str = "API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "metric"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OpenWeather API key; `API_KEY` in the environment wins over this.
    pub api_key: Option<String>,

    /// Unit system used when the app starts.
    pub units: DisplayUnit,

    pub base_url: String,

    pub countries_url: String,

    /// Per-request timeout for every outgoing call.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            units: DisplayUnit::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            countries_url: DEFAULT_COUNTRIES_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
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
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from the environment, falling back to the config file.
    pub fn api_key(&self) -> Result<String, WeatherError> {
        resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        let trimmed = api_key.trim();
        self.api_key = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn resolve_api_key(env: Option<String>, file: Option<&str>) -> Result<String, WeatherError> {
    env.as_deref()
        .into_iter()
        .chain(file)
        .map(str::trim)
        .find(|k| !k.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| {
            WeatherError::configuration(format!(
                "API key was not found. Ensure {API_KEY_ENV} is set in the environment.\n\
                 Hint: or run `weather configure` and enter your API key."
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_a_configuration_error() {
        let err = resolve_api_key(None, None).unwrap_err();

        assert!(matches!(err, WeatherError::Configuration(_)));
        assert!(err.to_string().contains("API key was not found"));
    }

    #[test]
    fn environment_wins_over_file() {
        let key = resolve_api_key(Some("ENV_KEY".into()), Some("FILE_KEY")).unwrap();
        assert_eq!(key, "ENV_KEY");
    }

    #[test]
    fn blank_environment_falls_back_to_file() {
        let key = resolve_api_key(Some("  ".into()), Some("FILE_KEY")).unwrap();
        assert_eq!(key, "FILE_KEY");

        assert!(resolve_api_key(Some(String::new()), Some("")).is_err());
    }

    #[test]
    fn set_api_key_trims_and_clears() {
        let mut cfg = Config::default();

        cfg.set_api_key("  OPEN_KEY \n".into());
        assert_eq!(cfg.api_key.as_deref(), Some("OPEN_KEY"));

        cfg.set_api_key("   ".into());
        assert_eq!(cfg.api_key, None);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml("units = \"metric\"\n").unwrap();

        assert_eq!(cfg.units, DisplayUnit::Metric);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.countries_url, DEFAULT_COUNTRIES_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.api_key, None);
    }

    #[test]
    fn toml_roundtrip_preserves_settings() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.units = DisplayUnit::Metric;
        cfg.timeout_secs = 3;

        let text = toml::to_string_pretty(&cfg).unwrap();
        let back = Config::from_toml(&text).unwrap();

        assert_eq!(back.api_key.as_deref(), Some("KEY"));
        assert_eq!(back.units, DisplayUnit::Metric);
        assert_eq!(back.timeout_secs, 3);
    }

    #[test]
    fn unknown_unit_in_toml_is_rejected() {
        assert!(Config::from_toml("units = \"kelvin\"\n").is_err());
    }
}
