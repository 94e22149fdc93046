use serde::{Deserialize, Serialize};

/// Request body for adding a favorite.
#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
}
