//! Error types for the item API client.
//!
//! # Design
//! `NotFound` and `Validation` get dedicated variants because they are the
//! two failures the server reports on purpose. All other unexpected statuses
//! land in `HttpError` with the raw status code and body for debugging.

use thiserror::Error;

/// Errors returned by `ItemClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the requested item does not exist.
    #[error("item not found")]
    NotFound,

    /// The server returned 400 with the given message.
    #[error("rejected by server: {0}")]
    Validation(String),

    /// The server returned an unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
