//! Error types for VoiceLink

use std::io;
use thiserror::Error;

/// Main error type for VoiceLink
#[derive(Error, Debug)]
pub enum VoicelinkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("Remote voice error: {0}")]
    Remote(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Audio playback error: {0}")]
    Audio(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for VoiceLink operations
pub type Result<T> = std::result::Result<T, VoicelinkError>;

impl From<String> for VoicelinkError {
    fn from(s: String) -> Self {
        VoicelinkError::Other(s)
    }
}

impl From<&str> for VoicelinkError {
    fn from(s: &str) -> Self {
        VoicelinkError::Other(s.to_string())
    }
}
