//! Errors surfaced by the item service and their HTTP mapping.
//!
//! Every error renders as a JSON object with a single `error` message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures of store operations. Neither variant has side effects on the
/// collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Name and description are required")]
    Validation,

    #[error("Item not found")]
    NotFound,
}

impl StoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            StoreError::Validation => StatusCode::BAD_REQUEST,
            StoreError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Errors returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The body claimed to be JSON but could not be decoded.
    #[error("{0}")]
    InvalidBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(err) => err.status(),
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_wire_contract() {
        assert_eq!(StoreError::Validation.to_string(), "Name and description are required");
        assert_eq!(StoreError::NotFound.to_string(), "Item not found");
    }

    #[test]
    fn statuses() {
        assert_eq!(ApiError::from(StoreError::Validation).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(StoreError::NotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::InvalidBody("bad".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn store_error_message_passes_through() {
        let err = ApiError::from(StoreError::NotFound);
        assert_eq!(err.to_string(), "Item not found");
    }
}
