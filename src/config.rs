use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

/// Environment variable holding the remote-service credential. The only
/// credential source; checked once at startup.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TrackerConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl TrackerConfig {
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path();
        if config_path.exists() {
            let raw = fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config file {}", config_path.display()))?;
            let parsed: TrackerConfig = toml::from_str(&raw)
                .with_context(|| format!("failed to parse TOML from {}", config_path.display()))?;
            return Ok(parsed);
        }

        Ok(TrackerConfig::default())
    }
}

fn resolve_config_path() -> PathBuf {
    if let Ok(path) = env::var("DRAWTRACK_CONFIG") {
        return Path::new(&path).to_path_buf();
    }

    if let Some(base) = dirs::config_dir() {
        return base.join("drawtrack").join("config.toml");
    }

    Path::new("drawtrack.toml").to_path_buf()
}

pub fn load_api_key() -> Result<String> {
    let key = env::var(API_KEY_VAR).map_err(|_| {
        anyhow!("{API_KEY_VAR} is not set; export it or set remote.enable = false in the config")
    })?;
    if key.trim().is_empty() {
        return Err(anyhow!("{API_KEY_VAR} is set but empty"));
    }
    Ok(key)
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
        }
    }
}

fn default_data_path() -> PathBuf {
    if let Some(base) = dirs::data_dir() {
        return base.join("drawtrack").join("data.json");
    }

    PathBuf::from("data.json")
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_enabled")]
    pub enable: bool,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enable: default_remote_enabled(),
            api_base: default_api_base(),
            model: default_model(),
        }
    }
}

fn default_remote_enabled() -> bool {
    true
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_pin")]
    pub pin: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pin: default_pin(),
        }
    }
}

fn default_pin() -> String {
    "2579".to_string()
}
