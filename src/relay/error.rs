use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream error: HTTP {status} {status_text}")]
    Upstream { status: u16, status_text: String },

    #[error("Decoding error: {0}")]
    Decoding(String),

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Coarse classification of a [`RelayError`], safe to store and compare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    Upstream,
    Decoding,
    Transport,
}

impl RelayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::Configuration(_) => ErrorKind::Configuration,
            RelayError::Upstream { .. } => ErrorKind::Upstream,
            RelayError::Decoding(_) => ErrorKind::Decoding,
            RelayError::Transport(_) => ErrorKind::Transport,
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Decoding(err.to_string())
    }
}
