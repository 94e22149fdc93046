use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{Ack, ProgressItem, SetProgressRequest};
use super::repo;
use crate::{activity, auth::extractors::AuthUser, error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/progress", get(list_progress).post(set_progress))
        .route("/progress/:id", delete(delete_progress))
}

#[instrument(skip(state))]
pub async fn list_progress(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<Vec<ProgressItem>>, ApiError> {
    let rows = repo::list_by_user(&state.db, &email).await?;
    let items = rows
        .into_iter()
        .map(|r| ProgressItem {
            id: r.recipe_id,
            status: r.status,
            position: r.position,
            timestamp: r.timestamp,
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state, body))]
pub async fn set_progress(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Json(body): Json<SetProgressRequest>,
) -> Result<Json<Ack>, ApiError> {
    if body.id.is_empty() || body.status.is_empty() {
        return Err(ApiError::Validation("Missing id or status".into()));
    }

    let now_ms = state.clock.now_ms();

    let mut tx = state.db.begin().await?;
    repo::upsert(&mut tx, &email, &body.id, &body.status, body.position, now_ms).await?;
    activity::repo::append(
        &mut tx,
        &email,
        &format!("progress:{}:{}", body.id, body.status),
        now_ms,
    )
    .await?;
    tx.commit().await?;

    info!(email = %email, recipe_id = %body.id, status = %body.status, "progress saved");
    Ok(Json(Ack { ok: true }))
}

#[instrument(skip(state))]
pub async fn delete_progress(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    repo::remove(&state.db, &email, &id).await?;
    Ok(Json(Ack { ok: true }))
}
