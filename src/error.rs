//! Error handling for oxide-icon

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for icon extraction
#[derive(Debug, Error)]
pub enum IconError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No suitable icon found: {0}")]
    NotFound(String),

    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid PNG header: {0}")]
    InvalidPng(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Shell icon extraction failed: {0}")]
    Shell(String),
}

impl IconError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IconError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when a caller should try another retrieval strategy.
    pub fn is_not_found(&self) -> bool {
        matches!(self, IconError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, IconError>;
