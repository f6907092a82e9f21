// src/infra/errors.rs — Error types for interview-coach

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoachError {
    // Provider errors
    #[error("Request to '{provider}' failed: {message}")]
    Transport {
        provider: String,
        message: String,
        timed_out: bool,
    },

    #[error("'{provider}' returned HTTP {status}: {body}")]
    Http {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("'{provider}' returned an empty response")]
    EmptyResponse { provider: String },

    // User errors
    #[error("Answer must not be empty")]
    EmptyAnswer,

    // Infra
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoachError {
    /// Whether a later identical attempt could plausibly succeed.
    /// Nothing retries automatically; failed requests carry it in their warn log.
    pub fn is_retriable(&self) -> bool {
        match self {
            CoachError::Transport { .. } => true,
            CoachError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
