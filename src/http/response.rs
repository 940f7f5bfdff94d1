//! Response bodies and the headers attached to every response.
//!
//! # Responsibilities
//! - JSON outcome body (`{"success": bool}`)
//! - Permissive cross-origin headers, set on every response including errors

use axum::http::{header, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use tower_http::set_header::SetResponseHeaderLayer;

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "POST, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str =
    "Accept, Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization";

/// Body returned for every POST that reaches the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
}

impl Outcome {
    pub fn success() -> Self {
        Self { success: true }
    }

    pub fn failure() -> Self {
        Self { success: false }
    }
}

/// The three CORS headers as `(name, value)` pairs.
pub fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(CORS_ALLOW_ORIGIN),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ),
    ]
}

/// Layers that stamp the CORS headers onto a response, overriding any existing value.
pub fn cors_layers() -> [SetResponseHeaderLayer<HeaderValue>; 3] {
    cors_headers().map(|(name, value)| SetResponseHeaderLayer::overriding(name, value))
}
