//! Client configuration.
//!
//! Loaded from `$ALERTA_HOME/config.toml` when present, with environment
//! overrides: `ALERTA_HOME` relocates the home directory (auth file and
//! config) and `ALERTA_BASE_URL` overrides the remote endpoint.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Default remote collection endpoint.
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Config file name inside the alerta home directory.
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// On-disk config schema.
#[derive(Debug, Clone, Deserialize, Default)]
struct ConfigFile {
    base_url: Option<String>,
}

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote service base URL, no trailing slash.
    pub base_url: String,
    /// Directory holding `auth.json` and `config.toml`.
    pub home: PathBuf,
}

impl Config {
    /// Loads configuration for the default home directory
    /// (`$ALERTA_HOME`, else `~/.alerta`).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_home(default_home())
    }

    /// Loads configuration rooted at an explicit home directory.
    pub fn load_from_home(home: PathBuf) -> Result<Self, ConfigError> {
        let path = home.join(CONFIG_FILE);
        let file: ConfigFile = if path.exists() {
            toml::from_str(&std::fs::read_to_string(&path)?)?
        } else {
            ConfigFile::default()
        };

        let base_url = std::env::var("ALERTA_BASE_URL")
            .ok()
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self { base_url, home })
    }
}

/// `$ALERTA_HOME`, else `~/.alerta`, else `./.alerta` as a last resort.
pub fn default_home() -> PathBuf {
    if let Ok(home) = std::env::var("ALERTA_HOME") {
        return PathBuf::from(home);
    }
    dirs::home_dir()
        .map(|h| h.join(".alerta"))
        .unwrap_or_else(|| PathBuf::from(".alerta"))
}
