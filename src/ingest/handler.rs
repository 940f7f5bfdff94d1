//! The ingestion handler.
//!
//! Pipeline, stopping at the first failure:
//! 1. `OPTIONS` → 200, empty body
//! 2. anything but `POST` → 405
//! 3. content type must contain `application/json` → else 400
//! 4. strict decode into [`Submission`] → else 500
//! 5. required fields → else 400
//! 6. per-field length bound → else 400
//! 7. insert `minimal`, then `full` → else 500
//! 8. 200 `{"success": true}`

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::response::Outcome;
use crate::http::server::AppState;
use crate::ingest::rejection::Rejection;
use crate::ingest::submission::{to_document, Submission};
use crate::ingest::validation::validate;
use crate::observability::metrics;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Axum entry point for every path.
pub async fn collect(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start = Instant::now();

    let response = match process(&state, &method, &headers, &body).await {
        Ok(response) => response,
        Err(rejection) => {
            if rejection.status().is_server_error() {
                tracing::error!(error = %rejection, "Submission failed");
            } else {
                tracing::warn!(reason = %rejection, "Submission rejected");
            }
            rejection.into_response()
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}

async fn process(
    state: &AppState,
    method: &Method,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Response, Rejection> {
    if *method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }
    if *method != Method::POST {
        return Err(Rejection::MethodNotAllowed(method.to_string()));
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default();
    if !content_type.contains(JSON_MEDIA_TYPE) {
        return Err(Rejection::UnsupportedContentType(content_type));
    }

    let submission: Submission = serde_json::from_slice(body).map_err(Rejection::Decode)?;
    validate(&submission, state.max_field_length)?;

    let pretty = serde_json::to_string_pretty(&submission).map_err(Rejection::Encode)?;
    tracing::info!(tier = %submission.level, "Accepted submission\n{}", pretty);

    let minimal = to_document(&submission.minimal).map_err(Rejection::Encode)?;
    let full = to_document(&submission.full).map_err(Rejection::Encode)?;
    let persisted = state.gateway.persist(minimal, full).await?;
    tracing::debug!(
        minimal_id = %persisted.minimal,
        full_id = %persisted.full,
        "Submission stored"
    );

    Ok((StatusCode::OK, Json(Outcome::success())).into_response())
}
