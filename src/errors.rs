use cashcast_config::ConfigError;
use cashcast_core::CoreError;
use thiserror::Error;

/// Top-level error for the library facade and CLI.
#[derive(Debug, Error)]
pub enum CashcastError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid usage: {0}")]
    Usage(String),
}
