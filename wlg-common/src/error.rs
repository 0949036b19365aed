//! Common error types for WLG

use thiserror::Error;

/// Common result type for WLG operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across WLG crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed TOML in a configuration file
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
