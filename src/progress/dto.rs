use serde::{Deserialize, Serialize};

/// Request body for writing progress. `position` is an optional offset.
#[derive(Debug, Deserialize)]
pub struct SetProgressRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub position: i64,
}

/// One progress record as returned to the client.
#[derive(Debug, Serialize)]
pub struct ProgressItem {
    pub id: String,
    pub status: String,
    pub position: i64,
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_defaults_to_zero() {
        let payload: SetProgressRequest =
            serde_json::from_str(r#"{"id":"r1","status":"done"}"#).unwrap();
        assert_eq!(payload.position, 0);
    }

    #[test]
    fn progress_item_serializes_recipe_id_as_id() {
        let item = ProgressItem {
            id: "r1".into(),
            status: "in_progress".into(),
            position: 3,
            timestamp: 1_000,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""id":"r1""#));
        assert!(json.contains(r#""position":3"#));
    }
}
