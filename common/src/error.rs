//! Error types

use thiserror::Error;

/// Shared error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown catalog preset: {0}")]
    UnknownPreset(String),
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;
