//! Error types for the record API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers routinely distinguish
//! "the record does not exist" from "the server returned an unexpected
//! status." Every other non-2xx response lands in `Http` with the raw status
//! and body. Failures raised by the transport itself are carried untouched in
//! `Transport`, so the caller can still downcast to the transport's own error.

use crate::transport::TransportError;

/// Errors returned by `RecordClient` and `RecordGateway`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found: {body}")]
    NotFound { body: String },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A route template still had a placeholder with no value supplied.
    #[error("path template {template} has no value for {{{placeholder}}}")]
    UnresolvedPlaceholder { template: String, placeholder: String },

    /// A placeholder value would not survive as a single path segment
    /// (empty, `.` or `..`).
    #[error("value {value:?} for {{{placeholder}}} is not a usable path segment")]
    InvalidPathSegment { placeholder: String, value: String },

    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
