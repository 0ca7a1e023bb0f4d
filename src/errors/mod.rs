use std::fmt;

#[derive(Debug)]
pub enum AppError {
    IoError(std::io::Error),
    TomlError(toml::de::Error),
    TomlSerializeError(toml::ser::Error),
    JsonError(serde_json::Error),
    MissingApiKey,
    InvalidInput(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::IoError(e) => write!(f, "IO error: {}", e),
            AppError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            AppError::TomlSerializeError(e) => write!(f, "TOML serialization error: {}", e),
            AppError::JsonError(e) => write!(f, "JSON error: {}", e),
            AppError::MissingApiKey => write!(
                f,
                "API key is required (set {})",
                crate::api::config::API_KEY_ENV
            ),
            AppError::InvalidInput(e) => write!(f, "Invalid input: {}", e),
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::TomlError(err)
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::TomlSerializeError(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonError(err)
    }
}
