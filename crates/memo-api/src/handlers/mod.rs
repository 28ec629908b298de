//! HTTP handlers for memo-api.
//!
//! Successful responses are `{"success": true, ...}` with the payload fields
//! flattened next to the flag. Failures are rendered by [`crate::ApiError`].

pub mod ai;
pub mod health;
pub mod notes;
pub mod onboarding;

use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::ApiError;
use memo_core::Error;

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

/// Wrap `data` in a success envelope.
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data,
    })
}

/// Envelope with no payload.
pub fn ok_empty() -> Json<ApiResponse<serde_json::Value>> {
    ok(serde_json::json!({}))
}

/// Parse a note id from the path. Malformed ids are reported like missing notes.
pub(crate) fn parse_note_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| Error::NotFound("Note not found.".to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_flattens_payload() {
        #[derive(Serialize)]
        struct Payload {
            note_id: u32,
        }
        let Json(body) = ok(Payload { note_id: 7 });
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value, serde_json::json!({"success": true, "note_id": 7}));
    }

    #[test]
    fn test_empty_envelope() {
        let Json(body) = ok_empty();
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value, serde_json::json!({"success": true}));
    }

    #[test]
    fn test_malformed_id_is_not_found() {
        let err = parse_note_id("not-a-uuid").unwrap_err();
        assert_eq!(err.parts().0, axum::http::StatusCode::NOT_FOUND);
    }
}
