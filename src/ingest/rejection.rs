//! Reasons a submission is turned away, and how each maps onto HTTP.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::http::response::Outcome;
use crate::store::StoreError;

/// Why a request did not result in two stored documents.
///
/// The response never says which field failed; the detail is only logged.
#[derive(Debug, Error)]
pub enum Rejection {
    #[error("method {0} not allowed")]
    MethodNotAllowed(String),

    #[error("content type `{0}` is not application/json")]
    UnsupportedContentType(String),

    #[error("request body does not decode as a submission: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("`level` and `minimal` must be set")]
    MissingFields,

    #[error("`{field}` is {length} characters long, limit is {max}")]
    TooLong {
        field: &'static str,
        length: usize,
        max: usize,
    },

    #[error("failed to encode submission: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Rejection {
    pub fn status(&self) -> StatusCode {
        match self {
            Rejection::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Rejection::UnsupportedContentType(_)
            | Rejection::MissingFields
            | Rejection::TooLong { .. } => StatusCode::BAD_REQUEST,
            // Undecodable bodies are reported as server errors, matching existing clients.
            Rejection::Decode(_) | Rejection::Encode(_) | Rejection::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Rejection::MethodNotAllowed(_) => (status, "Method not allowed").into_response(),
            _ => (status, Json(Outcome::failure())).into_response(),
        }
    }
}
