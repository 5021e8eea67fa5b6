use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use service::{Shot, ShotId};
use tracing::{info, warn};

use crate::errors::JsonApiError;
use crate::metrics;
use crate::routes::AppState;

/// List every shot in store order
pub async fn list_shots(State(state): State<AppState>) -> Json<Vec<Shot>> {
    Json(state.shots.list().await)
}

/// Append a shot; the body is stored verbatim
pub async fn create_shot(
    State(state): State<AppState>,
    Json(shot): Json<Shot>,
) -> (StatusCode, Json<Shot>) {
    let (created, total) = state.shots.create(shot).await;
    metrics::SHOTS_CREATED_TOTAL.inc();
    metrics::SHOTS_STORED.set(total as i64);
    info!(event = "shot_created", total, "shot created");
    (StatusCode::CREATED, Json(created))
}

/// Replace the shot at position `id`.
///
/// The id is checked before the body: an out-of-range id is a 404 even when
/// the body is missing or malformed.
pub async fn update_shot(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Shot>, JsonRejection>,
) -> Result<Json<Shot>, JsonApiError> {
    let id = parse_id(&id)?;
    let shot = match body {
        Ok(Json(shot)) => shot,
        Err(rejection) => {
            if id.index() >= state.shots.len().await {
                return Err(not_found(&id.to_string(), JsonApiError::shot_not_found()));
            }
            return Err(rejection.into());
        }
    };
    match state.shots.update(id, shot).await {
        Ok(updated) => {
            metrics::SHOTS_UPDATED_TOTAL.inc();
            info!(event = "shot_updated", %id, "shot updated");
            Ok(Json(updated))
        }
        Err(e) => Err(not_found(&id.to_string(), e.into())),
    }
}

/// Remove the shot at position `id`; later shots shift down by one
pub async fn delete_shot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    let id = parse_id(&id)?;
    match state.shots.delete(id).await {
        Ok(total) => {
            metrics::SHOTS_DELETED_TOTAL.inc();
            metrics::SHOTS_STORED.set(total as i64);
            info!(event = "shot_deleted", %id, total, "shot deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(not_found(&id.to_string(), e.into())),
    }
}

fn parse_id(raw: &str) -> Result<ShotId, JsonApiError> {
    ShotId::parse(raw).ok_or_else(|| not_found(raw, JsonApiError::shot_not_found()))
}

fn not_found(id: &str, err: JsonApiError) -> JsonApiError {
    metrics::SHOTS_NOT_FOUND_TOTAL.inc();
    warn!(event = "shot_not_found", id, "no shot at requested position");
    err
}
