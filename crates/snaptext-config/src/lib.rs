use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::hotkey::HotkeyConfig;
pub use self::notification::NotificationConfig;

pub mod hotkey;
pub mod notification;

/// Env var that replaces the OCR endpoint from the config file
pub const OCR_URL_ENV: &str = "SNAPTEXT_OCR_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Loaded once at startup and never mutated afterwards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OCR endpoint receiving the POST request
    pub url: String,
    #[serde(rename = "hot-key")]
    pub hotkey: HotkeyConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ConfigError::Invalid("url is empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "url must start with http:// or https://, got '{url}'"
            )));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var(OCR_URL_ENV)
            && !url.trim().is_empty()
        {
            tracing::info!("OCR endpoint overridden by {OCR_URL_ENV}");
            self.url = url;
        }
    }
}

/// Read the JSON config at `path`, apply env overrides and validate
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    tracing::info!("Loading config from {}", path.display());

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut config: Config = serde_json::from_reader(reader)?;

    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}
