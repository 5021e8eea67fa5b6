use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_gauge, Encoder, IntCounter, IntGauge, TextEncoder};
use tracing::error;

use crate::errors::JsonApiError;

// Prometheus metrics (default registry)
pub static SHOTS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("shots_created_total", "Total shots appended")
        .expect("register shots_created_total")
});

pub static SHOTS_UPDATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("shots_updated_total", "Total shots replaced by index")
        .expect("register shots_updated_total")
});

pub static SHOTS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("shots_deleted_total", "Total shots removed by index")
        .expect("register shots_deleted_total")
});

pub static SHOTS_NOT_FOUND_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("shots_not_found_total", "Total update/delete requests with an out-of-range id")
        .expect("register shots_not_found_total")
});

pub static SHOTS_STORED: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("shots_stored", "Shots currently held in memory")
        .expect("register shots_stored")
});

/// Force registration so every series shows up before its first increment.
pub fn init() {
    Lazy::force(&SHOTS_CREATED_TOTAL);
    Lazy::force(&SHOTS_UPDATED_TOTAL);
    Lazy::force(&SHOTS_DELETED_TOTAL);
    Lazy::force(&SHOTS_NOT_FOUND_TOTAL);
    Lazy::force(&SHOTS_STORED);
}

pub async fn metrics_handler() -> Result<impl IntoResponse, JsonApiError> {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buf) {
        error!(error = %e, "metrics encode failed");
        return Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "metrics encode failed"));
    }
    Ok(([(header::CONTENT_TYPE, encoder.format_type().to_string())], buf))
}
