//! Error types shared across Bloomlog crates.

use std::path::PathBuf;

/// Top-level error type for Bloomlog operations.
#[derive(Debug, thiserror::Error)]
pub enum BloomlogError {
    #[error("Compose error: {message}")]
    Compose { message: String },

    #[error("Timelapse error: {message}")]
    Timelapse { message: String },

    #[error("Notebook error: {message}")]
    Notebook { message: String },

    #[error("Garden error: {message}")]
    Garden { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Image decode error at {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using BloomlogError.
pub type BloomlogResult<T> = Result<T, BloomlogError>;

impl BloomlogError {
    pub fn compose(msg: impl Into<String>) -> Self {
        Self::Compose {
            message: msg.into(),
        }
    }

    pub fn timelapse(msg: impl Into<String>) -> Self {
        Self::Timelapse {
            message: msg.into(),
        }
    }

    pub fn notebook(msg: impl Into<String>) -> Self {
        Self::Notebook {
            message: msg.into(),
        }
    }

    pub fn garden(msg: impl Into<String>) -> Self {
        Self::Garden {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn decode(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
