//! Gemini configuration loaded from the environment.

use std::time::Duration;

use memo_core::defaults::{GEMINI_BASE_URL, GEMINI_PLACEHOLDER_KEY, GEN_MODEL};

/// Settings for the Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; `None` when unset, blank, or the sample placeholder.
    pub api_key: Option<String>,
    /// REST base URL, without a trailing slash.
    pub base_url: String,
    /// Model name used in the request path.
    pub model: String,
    /// Per-request timeout. No timeout is applied when unset.
    pub timeout: Option<Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: GEMINI_BASE_URL.to_string(),
            model: GEN_MODEL.to_string(),
            timeout: None,
        }
    }
}

impl GeminiConfig {
    /// Read `GEMINI_API_KEY`, `GEMINI_BASE_URL`, `GEMINI_MODEL` and `GEMINI_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let base_url = std::env::var("GEMINI_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| GEMINI_BASE_URL.to_string());
        let model = std::env::var("GEMINI_MODEL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| GEN_MODEL.to_string());
        let timeout = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs);

        Self {
            api_key: std::env::var("GEMINI_API_KEY").ok(),
            base_url,
            model,
            timeout,
        }
        .normalized()
    }

    /// Set the API key (the placeholder and blank values count as absent).
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self.normalized()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self.normalized()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether a usable API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn normalized(mut self) -> Self {
        self.api_key = self
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| is_usable_key(k));
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self
    }
}

/// A key is usable when it is non-blank and not the sample placeholder.
pub fn is_usable_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != GEMINI_PLACEHOLDER_KEY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_key() {
        let config = GeminiConfig::default();
        assert!(!config.has_api_key());
        assert_eq!(config.model, "gemini-2.0-flash-001");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_placeholder_key_is_absent() {
        let config = GeminiConfig::default().with_api_key("your_gemini_api_key_here");
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_blank_key_is_absent() {
        let config = GeminiConfig::default().with_api_key("   ");
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_real_key_is_present() {
        let config = GeminiConfig::default().with_api_key("valid-api-key-123");
        assert!(config.has_api_key());
        assert_eq!(config.api_key.as_deref(), Some("valid-api-key-123"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = GeminiConfig::default().with_base_url("http://localhost:9999/v1beta/");
        assert_eq!(config.base_url, "http://localhost:9999/v1beta");
    }
}
