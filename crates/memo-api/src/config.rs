//! Server configuration loaded from the environment.
//!
//! Only `DATABASE_URL` is mandatory; its absence aborts startup.

use std::time::Duration;

use memo_core::defaults::{MAX_BODY_BYTES, SERVER_HOST, SERVER_PORT, VIEW_CACHE_CAPACITY};
use memo_core::{Error, Result};

/// Default CORS origin for local development.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Global rate limit settings (generous; this is a personal server).
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub requests: u32,
    pub period: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests: 100,
            period: Duration::from_secs(60),
        }
    }
}

/// Top-level server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub max_body_bytes: usize,
    pub view_cache_capacity: usize,
    pub rate_limit: RateLimitConfig,
}

impl ServerConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL")
            .ok_or_else(|| Error::Config("DATABASE_URL is not set".to_string()))?;

        let parse_or = |key: &str, default: u64| -> u64 {
            get(key).and_then(|v| v.trim().parse().ok()).unwrap_or(default)
        };

        let rate_limit = RateLimitConfig {
            enabled: get("RATE_LIMIT_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            requests: (parse_or("RATE_LIMIT_REQUESTS", 100) as u32).max(1),
            period: Duration::from_secs(parse_or("RATE_LIMIT_PERIOD_SECS", 60).max(1)),
        };

        let allowed_origins = get("ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec![DEFAULT_ALLOWED_ORIGIN.to_string()]);

        Ok(Self {
            database_url,
            host: get("HOST").unwrap_or_else(|| SERVER_HOST.to_string()),
            port: parse_or("PORT", SERVER_PORT as u64) as u16,
            allowed_origins,
            max_body_bytes: parse_or("MAX_BODY_BYTES", MAX_BODY_BYTES as u64) as usize,
            view_cache_capacity: parse_or("VIEW_CACHE_CAPACITY", VIEW_CACHE_CAPACITY as u64)
                as usize,
            rate_limit,
        })
    }
}
