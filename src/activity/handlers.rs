use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::dto::{ActivityAck, ActivityItem, AddActivityRequest, ListQuery};
use super::repo;
use crate::{auth::extractors::AuthUser, error::ApiError, state::AppState};

const MAX_LIMIT: i64 = 1000;

/// Limits above [`MAX_LIMIT`] are clamped; non-positive or absent limits
/// mean "return everything".
fn clamp_limit(limit: Option<i64>) -> Option<i64> {
    match limit {
        Some(n) if n >= 1 => Some(n.min(MAX_LIMIT)),
        _ => None,
    }
}

/// Client timestamps are taken as-is when positive; anything else falls back
/// to the server clock.
fn effective_timestamp(provided: Option<i64>, now_ms: i64) -> i64 {
    match provided {
        Some(ts) if ts > 0 => ts,
        _ => now_ms,
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/activities", get(list_activities).post(add_activity))
}

#[instrument(skip(state))]
pub async fn list_activities(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<ActivityItem>>, ApiError> {
    let rows = repo::list_by_user(&state.db, &email, clamp_limit(q.limit)).await?;
    let items = rows
        .into_iter()
        .map(|r| ActivityItem {
            email: r.user_email,
            activity: r.activity,
            timestamp: r.timestamp,
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state, body))]
pub async fn add_activity(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Json(body): Json<AddActivityRequest>,
) -> Result<Json<ActivityAck>, ApiError> {
    if body.activity.is_empty() {
        return Err(ApiError::Validation("Missing activity".into()));
    }

    let ts = effective_timestamp(body.timestamp, state.clock.now_ms());

    let mut tx = state.db.begin().await?;
    let inserted = repo::append(&mut tx, &email, &body.activity, ts).await?;
    tx.commit().await?;

    Ok(Json(ActivityAck {
        ok: true,
        duplicate: (!inserted).then_some(true),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_in_range_passes_through() {
        assert_eq!(clamp_limit(Some(1)), Some(1));
        assert_eq!(clamp_limit(Some(5)), Some(5));
        assert_eq!(clamp_limit(Some(1000)), Some(1000));
    }

    #[test]
    fn limit_above_the_cap_is_clamped() {
        assert_eq!(clamp_limit(Some(1001)), Some(1000));
        assert_eq!(clamp_limit(Some(5000)), Some(1000));
    }

    #[test]
    fn non_positive_or_absent_limit_means_no_limit() {
        assert_eq!(clamp_limit(None), None);
        assert_eq!(clamp_limit(Some(0)), None);
        assert_eq!(clamp_limit(Some(-3)), None);
    }

    #[test]
    fn positive_client_timestamp_wins() {
        assert_eq!(effective_timestamp(Some(42), 1_000), 42);
    }

    #[test]
    fn zero_or_absent_timestamp_falls_back_to_the_clock() {
        assert_eq!(effective_timestamp(None, 1_000), 1_000);
        assert_eq!(effective_timestamp(Some(0), 1_000), 1_000);
        assert_eq!(effective_timestamp(Some(-5), 1_000), 1_000);
    }
}
