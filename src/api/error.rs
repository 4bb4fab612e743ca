//! Error types for calls against the search service.

use thiserror::Error;

/// Failures from the search backend or a local input capability.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, body read).
    #[error("Request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    /// The service answered with a non-2xx status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// The body was empty or did not match the expected shape.
    #[error("Malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// The capability (e.g. speech recognition) is not available here.
    #[error("{0} is not supported")]
    Unsupported(&'static str),

    /// Reading a local input file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    pub(crate) fn transport(endpoint: &str, err: impl std::fmt::Display) -> Self {
        ApiError::Transport { endpoint: endpoint.to_string(), message: err.to_string() }
    }

    pub(crate) fn decode(endpoint: &str, err: impl std::fmt::Display) -> Self {
        ApiError::Decode { endpoint: endpoint.to_string(), message: err.to_string() }
    }

    /// Returns the HTTP status for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
