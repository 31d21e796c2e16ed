//! Error types shared across Cutline crates.

use std::path::PathBuf;

/// Top-level error type for Cutline operations.
#[derive(Debug, thiserror::Error)]
pub enum CutlineError {
    #[error("Timeline error: {message}")]
    Timeline { message: String },

    #[error("Transform error: {message}")]
    Transform { message: String },

    #[error("Host error: {message}")]
    Host { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CutlineError.
pub type CutlineResult<T> = Result<T, CutlineError>;

impl CutlineError {
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline {
            message: msg.into(),
        }
    }

    pub fn transform(msg: impl Into<String>) -> Self {
        Self::Transform {
            message: msg.into(),
        }
    }

    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
