//! HTTP surface: the rendered page, its payload as JSON, and a health check.

use crate::config::Config;
use crate::error::Error;
use crate::page::{self, PagePayload};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use color_eyre::eyre::{Report, Result, WrapErr};
use log::{error, info};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Application state shared across HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Read-only pipeline configuration, every request rebuilds the page from it.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState { config: Arc::new(config) }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/payload", get(payload))
        .route("/health", get(health))
        .with_state(state)
}

/// Serve the dashboard on `address` (ex. `127.0.0.1:8000`) until the process stops.
pub async fn serve(config: Config, address: &str) -> Result<(), Report> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .wrap_err(format!("Failed to bind: {address:?}"))?;
    info!("Serving dashboard on http://{address}");
    axum::serve(listener, build_router(AppState::new(config))).await.wrap_err("Server stopped unexpectedly.")?;
    Ok(())
}

// ----------------------------------------------------------------------------
// Handlers
// ----------------------------------------------------------------------------

/// GET /
async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let payload = page::build(&state.config).await?;
    Ok(Html(payload.render()))
}

/// GET /api/payload
async fn payload(State(state): State<AppState>) -> Result<Json<PagePayload>, ApiError> {
    let payload = page::build(&state.config).await?;
    Ok(Json(payload))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ----------------------------------------------------------------------------
// Errors
// ----------------------------------------------------------------------------

/// A pipeline [`Error`] returned from a handler.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("{}", self.0);
        let body = Json(json!({ "error": self.0.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
