//! HTTP front end for the comparison service

pub mod error;
pub mod handlers;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::{Level, error, info};

use crate::service::ComparisonService;

/// Shared state handed to every handler. The service is immutable, so
/// requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ComparisonService>,
}

pub fn build_router(service: Arc<ComparisonService>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/compare", post(handlers::compare))
        .route("/health", get(handlers::health))
        .with_state(AppState { service })
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

pub async fn serve(bind: &str, service: Arc<ComparisonService>) -> Result<()> {
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address: {bind}"))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping");
}
