use std::sync::Arc;

use axum::{
    routing::{get, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::ShotRepository;

use crate::metrics;

pub mod shots;

/// Shared handler state; the store is injected rather than global.
#[derive(Clone)]
pub struct AppState {
    pub shots: Arc<dyn ShotRepository>,
}

impl AppState {
    pub fn new(shots: Arc<dyn ShotRepository>) -> Self {
        Self { shots }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: shots API, health, metrics, and the
/// static frontend as fallback.
pub fn build_router(state: AppState, cors: CorsLayer, frontend_dir: &str) -> Router {
    metrics::init();

    let static_dir = ServeDir::new(frontend_dir)
        .fallback(ServeFile::new(format!("{}/index.html", frontend_dir)));

    let api = Router::new()
        .route("/api/shots", get(shots::list_shots).post(shots::create_shot))
        .route("/api/shots/:id", put(shots::update_shot).delete(shots::delete_shot));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::metrics_handler))
        .merge(api)
        .fallback_service(static_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
