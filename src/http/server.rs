//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the ingestion handler on every path
//! - Wire up middleware (request ID, tracing, CORS headers, access log, body limit)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use std::net::SocketAddr;

use axum::{extract::DefaultBodyLimit, middleware, routing::any, Router};
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::CollectorConfig;
use crate::http::request::access_log;
use crate::http::response::cors_layers;
use crate::ingest::handler::collect;
use crate::lifecycle::ShutdownListener;
use crate::store::Gateway;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
    pub max_field_length: usize,
    pub debug: bool,
}

impl AppState {
    pub fn new(config: &CollectorConfig, gateway: Gateway) -> Self {
        Self {
            gateway,
            max_field_length: config.limits.max_field_length,
            debug: config.observability.debug,
        }
    }
}

/// HTTP server for the collector.
pub struct CollectorServer {
    router: Router,
}

impl CollectorServer {
    /// Create a new HTTP server writing through `gateway`.
    pub fn new(config: CollectorConfig, gateway: Gateway) -> Self {
        let state = AppState::new(&config, gateway);
        let router = build_router(&config, state);
        Self { router }
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownListener,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
///
/// Every path is routed to the ingestion handler.
pub fn build_router(config: &CollectorConfig, state: AppState) -> Router {
    let router = Router::new()
        .route("/", any(collect))
        .route("/{*path}", any(collect))
        .layer(RequestBodyLimitLayer::new(config.limits.body_limit()))
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn_with_state(state.clone(), access_log))
        .with_state(state);

    cors_layers()
        .into_iter()
        .fold(router, |router, layer| router.layer(layer))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
