// src/utils/config.rs

use crate::api::config::{BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};

/// Maximum accepted request body (10 MB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Server settings persisted in `config.toml`. The API key is never stored
/// here; it is read from the environment at startup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Resolves the config file location: the given override, or `config.toml`
/// next to the executable.
pub fn get_config_path(path_override: Option<&Path>) -> Result<PathBuf, AppError> {
    if let Some(path) = path_override {
        return Ok(path.to_path_buf());
    }
    let mut path = get_executable_dir()?;
    path.push("config.toml");
    Ok(path)
}

/// Validate config to prevent obviously wrong or missing values.
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    if config.host.trim().is_empty() {
        return Err(AppError::InvalidInput("Host cannot be empty".to_string()));
    }
    if config.port == 0 {
        return Err(AppError::InvalidInput("Port cannot be zero".to_string()));
    }
    if config.model.trim().is_empty() {
        return Err(AppError::InvalidInput("Model cannot be empty".to_string()));
    }
    if config.base_url.trim().is_empty() {
        return Err(AppError::InvalidInput("Base URL cannot be empty".to_string()));
    }
    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(AppError::InvalidInput(
            "Temperature must be between 0.0 and 2.0".to_string(),
        ));
    }
    if config.max_body_bytes == 0 {
        return Err(AppError::InvalidInput(
            "Maximum body size cannot be zero".to_string(),
        ));
    }
    Ok(())
}

/// Read config from file, and create a default config if none exists.
pub fn read_config(path_override: Option<&Path>) -> Result<Config, AppError> {
    let config = load_config(path_override)?;
    validate_config(&config)?;
    Ok(config)
}

/// Like [`read_config`] but without validation, so bad values can be repaired.
pub fn load_config(path_override: Option<&Path>) -> Result<Config, AppError> {
    let config_path = get_config_path(path_override)?;
    if !config_path.exists() {
        write_config(&Config::default(), Some(config_path.as_path()))?;
    }
    let config_str = fs::read_to_string(&config_path)?;
    Ok(toml::from_str(&config_str)?)
}

pub fn write_config(config: &Config, path_override: Option<&Path>) -> Result<(), AppError> {
    let config_path = get_config_path(path_override)?;
    let config_str = toml::to_string(config)?;
    fs::write(config_path, config_str)?;
    Ok(())
}

fn get_executable_dir() -> Result<PathBuf, AppError> {
    let executable = env::current_exe()?;
    executable
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| AppError::Internal("Executable has no parent directory".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let config = Config {
            temperature: 2.5,
            ..Config::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(AppError::InvalidInput(_))
        ));

        let config = Config {
            port: 0,
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());

        let config = Config {
            model: " ".to_string(),
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let config: Config = toml::from_str("port = 9000\nmodel = \"gpt-4o\"").unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.host, Config::default().host);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
    }
}
