use serde::{Deserialize, Serialize};

/// Query string for listing activities.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// Request body for recording an activity.
#[derive(Debug, Deserialize)]
pub struct AddActivityRequest {
    #[serde(default)]
    pub activity: String,
    pub timestamp: Option<i64>,
}

/// One activity log entry as returned to the client.
#[derive(Debug, Serialize)]
pub struct ActivityItem {
    pub email: String,
    pub activity: String,
    pub timestamp: i64,
}

/// Acknowledgement for activity writes; `duplicate` marks a collapsed retry.
#[derive(Debug, Serialize)]
pub struct ActivityAck {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ack_omits_duplicate_when_absent() {
        let json = serde_json::to_string(&ActivityAck {
            ok: true,
            duplicate: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"ok":true}"#);
    }

    #[test]
    fn ack_carries_duplicate_when_collapsed() {
        let json = serde_json::to_string(&ActivityAck {
            ok: true,
            duplicate: Some(true),
        })
        .unwrap();
        assert_eq!(json, r#"{"ok":true,"duplicate":true}"#);
    }
}
