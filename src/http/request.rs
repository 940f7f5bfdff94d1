//! Request logging.
//!
//! # Responsibilities
//! - Log remote address, method and path of every request
//! - In debug mode, also log the full request line and headers
//!
//! # Design Decisions
//! - Runs inside the request-ID layer so the ID is in scope
//! - Remote address comes from `ConnectInfo` when the server provides it

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::server::AppState;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Access-log middleware.
pub async fn access_log(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    tracing::info!(
        request_id = %request_id,
        remote = %remote,
        method = %request.method(),
        path = %request.uri().path(),
        "Request"
    );

    if state.debug {
        tracing::debug!(
            request_id = %request_id,
            uri = %request.uri(),
            version = ?request.version(),
            headers = ?request.headers(),
            "Request detail"
        );
    }

    next.run(request).await
}
