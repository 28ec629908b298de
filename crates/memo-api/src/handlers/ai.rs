//! AI playground and call-log handlers.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use memo_core::defaults::{
    CALL_LOG_MAX_DAYS, CALL_LOG_RECENT_LIMIT, CALL_LOG_RETENTION_DAYS, CALL_LOG_STATS_DAYS,
};
use memo_core::Error;
use memo_inference::{ApiCallLog, ApiStats, TokenUsage};

use super::ok;
use crate::auth::MaybeUser;
use crate::{ApiError, AppState};

/// Playground request.
#[derive(Debug, Deserialize)]
pub struct PlaygroundRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlaygroundResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CleanupRequest {
    #[serde(default)]
    pub days_to_keep: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct LogsEnvelope {
    pub logs: Vec<ApiCallLog>,
}

#[derive(Debug, Serialize)]
pub struct StatsEnvelope {
    pub days: i64,
    pub stats: ApiStats,
}

#[derive(Debug, Serialize)]
pub struct UsageEnvelope {
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Serialize)]
pub struct CleanupEnvelope {
    pub remaining: usize,
}

/// Ad-hoc generation over arbitrary text. Nothing is stored.
///
/// `action` is one of `summarize`, `tags` or `both`.
pub async fn playground(
    State(state): State<AppState>,
    body: Result<Json<PlaygroundRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let content = req
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Text content is required.".to_string()))?;

    let generation = &state.generation;
    let result = match req.action.as_deref().map(str::trim) {
        Some("summarize") => PlaygroundResult {
            summary: Some(generation.summarize(&content).await?.content),
            tags: None,
        },
        Some("tags") => PlaygroundResult {
            summary: None,
            tags: Some(generation.tags(&content).await?.tags),
        },
        Some("both") => {
            let artifacts = generation.both(&content).await?;
            PlaygroundResult {
                summary: Some(artifacts.summary.content),
                tags: Some(artifacts.tags.tags),
            }
        }
        _ => {
            return Err(ApiError::BadRequest(
                "Unsupported action. Use summarize, tags, or both.".to_string(),
            ))
        }
    };
    Ok(ok(result))
}

/// Most recent provider calls, newest first.
pub async fn recent_logs(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<LogsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    user.ok_or(Error::AuthenticationRequired)?;
    let logs = state
        .call_log
        .recent_logs(Some(query.limit.unwrap_or(CALL_LOG_RECENT_LIMIT)));
    Ok(ok(LogsEnvelope { logs }))
}

/// Aggregate statistics over the trailing `days` window.
pub async fn stats(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<StatsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    user.ok_or(Error::AuthenticationRequired)?;
    let days = query
        .days
        .unwrap_or(CALL_LOG_STATS_DAYS)
        .clamp(0, CALL_LOG_MAX_DAYS);
    let stats = state.call_log.stats(days);
    Ok(ok(StatsEnvelope { days, stats }))
}

pub async fn usage_today(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<impl IntoResponse, ApiError> {
    user.ok_or(Error::AuthenticationRequired)?;
    Ok(ok(UsageEnvelope {
        usage: state.call_log.today_token_usage(),
    }))
}

/// Drop log entries older than `days_to_keep` (0 clears everything).
pub async fn cleanup_logs(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    body: Option<Json<CleanupRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    user.ok_or(Error::AuthenticationRequired)?;
    let days = body
        .and_then(|Json(req)| req.days_to_keep)
        .unwrap_or(CALL_LOG_RETENTION_DAYS);
    if days < 0 {
        return Err(Error::validation("days_to_keep", "days_to_keep must not be negative.").into());
    }
    let days = days.min(CALL_LOG_MAX_DAYS);
    let remaining = state.call_log.cleanup(days);
    tracing::info!(subsystem = "api", component = "ai", days_to_keep = days, remaining, "Call log cleaned up");
    Ok(ok(CleanupEnvelope { remaining }))
}
