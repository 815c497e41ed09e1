//! HTTP surface: the two model proxies plus favorites and health.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info};

use crate::errors::{GenError, ValidationError};
use crate::favorites::{FavoritesStore, StoreError};
use crate::gateway::Gateway;
use crate::wire::ErrorBody;

mod handlers;

/// Prompts are capped at 1000 chars; 64KB leaves room for the rest.
pub const MAX_BODY_SIZE: usize = 65_536;
/// Upper bound on a whole request, above the upstream client timeout.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
    pub favorites: Arc<FavoritesStore>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::handle_health))
        .route("/api/llm", post(handlers::handle_verse))
        .route("/api/topics", post(handlers::handle_topic))
        .route(
            "/api/favorites",
            get(handlers::handle_list_favorites).post(handlers::handle_add_favorite),
        )
        .route("/api/favorites/{id}", delete(handlers::handle_remove_favorite))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ))
        .layer(CorsLayer::permissive())
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn run(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(
        addr = %local,
        provider = state.gateway.provider_name(),
        favorites = %state.favorites.path().display(),
        "neurosong listening"
    );
    println!("  POST /api/llm       generate a verse");
    println!("  POST /api/topics    suggest a topic");
    println!("  GET  /api/favorites list saved verses");
    println!("  GET  /health        health check");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;
    Ok(())
}

fn error_response(status: StatusCode, error: String, kind: Option<&str>) -> Response {
    let body = ErrorBody { error, kind: kind.map(str::to_string) };
    (status, Json(body)).into_response()
}

impl IntoResponse for GenError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.kind.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        error_response(status, self.message, Some(self.kind.as_str()))
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        error_response(StatusCode::BAD_REQUEST, self.to_string(), None)
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        error!(error = %self, "favorites store failed");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, self.to_string(), None)
    }
}
