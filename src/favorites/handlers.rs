use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{Ack, AddFavoriteRequest};
use super::repo;
use crate::{activity, auth::extractors::AuthUser, error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list_favorites).post(add_favorite))
        .route("/favorites/:id", delete(remove_favorite))
}

#[instrument(skip(state))]
pub async fn list_favorites(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<Vec<String>>, ApiError> {
    let ids = repo::list_by_user(&state.db, &email).await?;
    Ok(Json(ids))
}

#[instrument(skip(state, body))]
pub async fn add_favorite(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Json(body): Json<AddFavoriteRequest>,
) -> Result<Json<Ack>, ApiError> {
    if body.id.is_empty() {
        return Err(ApiError::Validation("Missing id".into()));
    }

    let mut tx = state.db.begin().await?;
    repo::add(&mut tx, &email, &body.id).await?;
    // records the action, not the state change, so it fires on repeated adds too
    activity::repo::append(
        &mut tx,
        &email,
        &format!("added_favorite:{}", body.id),
        state.clock.now_ms(),
    )
    .await?;
    tx.commit().await?;

    info!(email = %email, recipe_id = %body.id, "favorite added");
    Ok(Json(Ack { ok: true }))
}

#[instrument(skip(state))]
pub async fn remove_favorite(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    let mut tx = state.db.begin().await?;
    repo::remove(&mut tx, &email, &id).await?;
    activity::repo::append(
        &mut tx,
        &email,
        &format!("removed_favorite:{}", id),
        state.clock.now_ms(),
    )
    .await?;
    tx.commit().await?;

    Ok(Json(Ack { ok: true }))
}
