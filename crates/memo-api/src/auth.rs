//! Caller authentication.
//!
//! Sign-up, sign-in and session management belong to the external auth
//! provider. This module only turns a session token into a [`CurrentUser`].

use std::collections::HashMap;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use memo_core::{AuthProvider, CurrentUser, Error, Result};

use crate::error::ApiError;
use crate::state::AppState;

/// Cookie carrying the session token for browser clients.
pub const SESSION_COOKIE: &str = "memo-access-token";

/// Supabase connection settings.
#[derive(Debug, Clone)]
pub struct SupabaseAuthConfig {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseAuthConfig {
    /// Read `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("SUPABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Config("SUPABASE_URL is not set".to_string()))?;
        let anon_key = std::env::var("SUPABASE_ANON_KEY").unwrap_or_default();
        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SupabaseUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

/// Resolves tokens through the Supabase `/auth/v1/user` endpoint.
pub struct SupabaseAuth {
    client: Client,
    config: SupabaseAuthConfig,
}

impl SupabaseAuth {
    pub fn new(config: SupabaseAuthConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn current_user(&self, token: &str) -> Result<Option<CurrentUser>> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.config.url))
            .bearer_auth(token)
            .header("apikey", &self.config.anon_key)
            .send()
            .await
            .map_err(|e| Error::Request(format!("Auth provider request failed: {}", e)))?;

        match response.status() {
            status if status.is_success() => {
                let user: SupabaseUser = response.json().await.map_err(|e| {
                    Error::Serialization(format!("Invalid auth provider response: {}", e))
                })?;
                Ok(Some(CurrentUser {
                    id: user.id,
                    email: user.email,
                }))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status => Err(Error::Request(format!(
                "Auth provider returned {}",
                status
            ))),
        }
    }
}

/// Fixed token table; used in tests and local development.
#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    users: HashMap<String, CurrentUser>,
}

impl StaticAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, token: impl Into<String>, user: CurrentUser) -> Self {
        self.users.insert(token.into(), user);
        self
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn current_user(&self, token: &str) -> Result<Option<CurrentUser>> {
        Ok(self.users.get(token).cloned())
    }
}

/// Session token from `Authorization: Bearer` or the session cookie.
pub fn session_token(parts: &Parts) -> Option<String> {
    if let Some(token) = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        return Some(token.to_string());
    }

    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// The caller, if any. Actions decide whether anonymity is an error.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

#[axum::async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let Some(token) = session_token(parts) else {
            return Ok(MaybeUser(None));
        };

        match state.auth.current_user(&token).await {
            Ok(user) => {
                debug!(
                    subsystem = "api",
                    component = "auth",
                    authenticated = user.is_some(),
                    "Resolved session token"
                );
                Ok(MaybeUser(user))
            }
            Err(e) => {
                warn!(subsystem = "api", component = "auth", error = %e, "Auth provider lookup failed");
                Err(ApiError::from(e))
            }
        }
    }
}
