//! Errors reported by chat-platform clients.

use thiserror::Error;

/// Failure of a single platform call.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The request never produced a usable HTTP response.
    #[error("transport error calling {method}: {message}")]
    Transport { method: String, message: String },

    /// The platform answered but reported failure (`"ok": false`).
    #[error("{method} failed: {error}")]
    Api { method: String, error: String },

    /// A successful response was missing a field we rely on.
    #[error("{method} response missing `{field}`")]
    MissingField { method: String, field: String },

    /// The response body could not be decoded.
    #[error("could not decode {method} response: {message}")]
    Decode { method: String, message: String },
}

impl PlatformError {
    pub fn transport(method: &str, err: impl std::fmt::Display) -> Self {
        PlatformError::Transport {
            method: method.to_string(),
            message: err.to_string(),
        }
    }

    pub fn api(method: &str, error: impl Into<String>) -> Self {
        PlatformError::Api {
            method: method.to_string(),
            error: error.into(),
        }
    }

    pub fn missing(method: &str, field: &str) -> Self {
        PlatformError::MissingField {
            method: method.to_string(),
            field: field.to_string(),
        }
    }

    pub fn decode(method: &str, err: impl std::fmt::Display) -> Self {
        PlatformError::Decode {
            method: method.to_string(),
            message: err.to_string(),
        }
    }
}
