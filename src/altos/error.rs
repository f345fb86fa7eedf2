//! Error types for the Altos client

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the client
pub type Result<T> = std::result::Result<T, AltosError>;

#[derive(Debug, Error)]
pub enum AltosError {
    /// Caller supplied something the client cannot work with (bad date, wrong file type)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Transport failure, non-success status, or an undecodable response body
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Missing credentials or an HTTP client that could not be built
    #[error("configuration error: {0}")]
    Config(String),

    /// The listing did not contain what we looked for
    #[error("lookup failed: {0}")]
    Lookup(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl AltosError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AltosError::Io {
            path: path.into(),
            source,
        }
    }
}
