use serde::{Deserialize, Serialize};

/// Request body for signup. All fields default to empty so missing input is
/// rejected by handler validation instead of body deserialization.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response returned after signup or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub email: String,
    pub name: String,
}

/// Public part of the user returned from /me.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub email: String,
    pub name: String,
}
