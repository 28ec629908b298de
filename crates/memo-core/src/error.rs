//! Error types for memo.

use thiserror::Error;

/// Result type alias using memo's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown to callers when an internal failure must not leak details.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Core error type for memo operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No authenticated caller could be resolved
    #[error("Login required.")]
    AuthenticationRequired,

    /// Input rejected before any side effect
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// Resource not found (or not owned by the caller)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage failure already translated into a user-facing message
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Generative provider call failed; carries the provider's message
    #[error("Inference error: {0}")]
    Inference(String),

    /// Generative provider answered with blank text
    #[error("The model returned an empty result.")]
    EmptyResponse,

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a validation failure on `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            field,
            message: message.into(),
        }
    }

    /// The message safe to return to an end user.
    ///
    /// Validation, not-found, persistence and provider messages pass through
    /// unchanged. Raw database, transport and internal failures collapse into
    /// [`GENERIC_FAILURE_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            Error::AuthenticationRequired | Error::EmptyResponse => self.to_string(),
            Error::Validation { message, .. } => message.clone(),
            Error::NotFound(msg) | Error::Persistence(msg) | Error::Inference(msg) => msg.clone(),
            Error::Database(_)
            | Error::Serialization(_)
            | Error::Config(_)
            | Error::Request(_)
            | Error::Internal(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_authentication_required() {
        assert_eq!(Error::AuthenticationRequired.to_string(), "Login required.");
    }

    #[test]
    fn test_error_display_validation() {
        let err = Error::validation("title", "Title is required.");
        assert_eq!(err.to_string(), "Invalid title: Title is required.");
    }

    #[test]
    fn test_error_display_empty_response() {
        assert_eq!(
            Error::EmptyResponse.to_string(),
            "The model returned an empty result."
        );
    }

    #[test]
    fn test_user_message_passes_validation_text_through() {
        let err = Error::validation("content", "Content is required.");
        assert_eq!(err.user_message(), "Content is required.");
    }

    #[test]
    fn test_user_message_passes_provider_text_through() {
        let err = Error::Inference("quota exceeded".to_string());
        assert_eq!(err.user_message(), "quota exceeded");
    }

    #[test]
    fn test_user_message_hides_database_details() {
        let err = Error::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_user_message_hides_internal_details() {
        let err = Error::Internal("lock poisoned".to_string());
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
