//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router with the origin-request and health handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind the server to a listener with graceful shutdown
//!
//! Rejections are part of the protocol, not HTTP errors: the platform gets a
//! 200 whose body is either the rewritten request descriptor or the
//! `{status, statusDescription}` rejection object. Only configuration faults
//! surface as a 500.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::RouterConfig;
use crate::edge::{EdgeHandler, EdgeRequest};
use crate::http::request::propagate_request_id;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<EdgeHandler>,
}

/// HTTP server exposing the edge handler to the invoking platform.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and handler.
    pub fn new(config: &RouterConfig, handler: Arc<EdgeHandler>) -> Self {
        let state = AppState { handler };
        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the axum router with all middleware layers.
    pub fn build_router(config: &RouterConfig, state: AppState) -> Router {
        Router::new()
            .route("/origin-request", post(origin_request_handler))
            .route("/healthz", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(middleware::from_fn(propagate_request_id))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main origin-request handler: hand the descriptor to the edge handler and
/// return its decision.
async fn origin_request_handler(
    State(state): State<AppState>,
    Json(request): Json<EdgeRequest>,
) -> Response {
    match state.handler.handle(request).await {
        Ok(decision) => Json(decision).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "routing configuration fault");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
