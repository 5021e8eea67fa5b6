use std::net::SocketAddr;

use axum::Router;
use common::env::check_frontend_dir;
use configs::AppConfig;
use service::ShotStore;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn parse_bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let addr = cfg.bind_addr();
    addr.parse().map_err(|e: std::net::AddrParseError| StartupError::InvalidAddr {
        reason: e.to_string(),
        addr,
    })
}

/// Build the application with a fresh, empty shot store.
pub fn build_app(cfg: &AppConfig) -> Router {
    let state = AppState::new(ShotStore::new());
    routes::build_router(state, build_cors(), &cfg.frontend.dir)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Serve `cfg` until Ctrl+C. Logging and config loading are the caller's job.
pub async fn run_with_config(cfg: AppConfig) -> Result<(), StartupError> {
    check_frontend_dir(&cfg.frontend.dir).await;

    let app = build_app(&cfg);
    let addr = parse_bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })?;

    info!(%addr, frontend_dir = %cfg.frontend.dir, "starting shots server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StartupError::Any(e.into()))?;
    Ok(())
}
