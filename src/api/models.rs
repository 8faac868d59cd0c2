// API request/response models (DTOs). The catalog types themselves serialize
// in camelCase and double as wire shapes; only the handful of bodies without
// a domain counterpart live here.

use serde::{Deserialize, Serialize};

/// Body of a successful DELETE.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: i64,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

#[cfg(test)]
mod tests {
    use crate::catalog::NewGame;

    #[test]
    fn game_payload_is_camel_case() {
        let body = r#"{
            "publisherId": "p1",
            "name": "G",
            "platform": "ios",
            "storeId": "a1",
            "bundleId": "b1",
            "appVersion": "1.0",
            "isPublished": true
        }"#;
        let payload: NewGame = serde_json::from_str(body).unwrap();
        assert_eq!(payload.publisher_id.as_deref(), Some("p1"));
        assert_eq!(payload.store_id, "a1");
        assert!(payload.is_published);
    }

    #[test]
    fn omitted_payload_fields_take_defaults() {
        let payload: NewGame = serde_json::from_str(r#"{"name": "G"}"#).unwrap();
        assert_eq!(payload.platform, "");
        assert_eq!(payload.store_id, "");
        assert!(!payload.is_published);
        assert_eq!(payload.bundle_id, None);
    }
}
