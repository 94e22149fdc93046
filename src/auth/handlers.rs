use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    activity,
    auth::{
        dto::{AuthResponse, LoginRequest, MeResponse, SignupRequest},
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::User,
    },
    error::ApiError,
    state::AppState,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_string();

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation("Missing email or password".into()));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Account exists".into()));
    }

    let hash = hash_password(&payload.password)?;

    let mut tx = state.db.begin().await?;
    let user = User::create(&mut tx, &payload.email, &payload.name, &hash).await?;
    activity::repo::append(&mut tx, &user.email, "signup", state.clock.now_ms()).await?;
    tx.commit().await?;

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(&user.email)?;

    info!(email = %user.email, "user signed up");
    Ok(Json(AuthResponse {
        access_token,
        email: user.email,
        name: user.name,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_string();

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation("Missing email or password".into()));
    }

    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::Auth("Invalid credentials".into())
        })?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %user.email, "login invalid password");
        return Err(ApiError::Auth("Invalid credentials".into()));
    }

    let mut tx = state.db.begin().await?;
    activity::repo::append(&mut tx, &user.email, "login", state.clock.now_ms()).await?;
    tx.commit().await?;

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(&user.email)?;

    info!(email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        access_token,
        email: user.email,
        name: user.name,
    }))
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<MeResponse>, ApiError> {
    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::NotFound("Not found".into()))?;

    Ok(Json(MeResponse {
        email: user.email,
        name: user.name,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation_accepts_plain_addresses() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn email_validation_rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("spaces in@x.com"));
    }

    #[test]
    fn auth_response_serializes_token_and_identity() {
        let response = AuthResponse {
            access_token: "tok".into(),
            email: "a@x.com".into(),
            name: "Ann".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("access_token"));
        assert!(json.contains("a@x.com"));
        assert!(json.contains("Ann"));
    }

    #[test]
    fn signup_request_defaults_missing_fields_to_empty() {
        let payload: SignupRequest = serde_json::from_str("{}").unwrap();
        assert!(payload.name.is_empty());
        assert!(payload.email.is_empty());
        assert!(payload.password.is_empty());
    }
}
