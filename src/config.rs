use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub requests_per_minute: u64,
    pub output_path: String,
    pub log_level: String
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: "http://localhost:8080".to_string(),
            requests_per_minute: 120,
            output_path: "regions.html".to_string(),
            log_level: "info".to_string()
        }
    }
}

impl Config {
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

/// Reads the config file at `path`, falling back to defaults when it does not exist.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(path)?;
    parse_config(config_content.as_str())
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}
