//! HTTP error mapping.
//!
//! Every failure leaves the API as `{"success": false, "error": "<message>"}`.
//! Internal details are logged, never returned.

use axum::{
    extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json,
};
use tracing::error;

use memo_core::Error;

/// Error returned by handlers and extractors.
#[derive(Debug)]
pub enum ApiError {
    Core(Error),
    BadRequest(String),
    TooManyRequests,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Core(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    /// Status and user-facing message.
    pub fn parts(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests. Please wait before retrying.".to_string(),
            ),
            ApiError::Core(err) => {
                let status = match err {
                    Error::AuthenticationRequired => StatusCode::UNAUTHORIZED,
                    Error::Validation { .. } => StatusCode::BAD_REQUEST,
                    Error::NotFound(_) => StatusCode::NOT_FOUND,
                    Error::Inference(_) | Error::EmptyResponse => StatusCode::BAD_GATEWAY,
                    Error::Persistence(_)
                    | Error::Database(_)
                    | Error::Serialization(_)
                    | Error::Config(_)
                    | Error::Request(_)
                    | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.user_message())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = self.parts();
        if let ApiError::Core(
            err @ (Error::Database(_) | Error::Internal(_) | Error::Request(_) | Error::Config(_)),
        ) = &self
        {
            error!(subsystem = "api", error = %err, "Request failed with internal error");
        }

        let body = Json(serde_json::json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
