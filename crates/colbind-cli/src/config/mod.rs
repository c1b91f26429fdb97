mod atomic;
mod settings;

pub use settings::{DEFAULT_SETTINGS_FILE, load_or_create_settings, load_settings};

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("invalid config path: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
