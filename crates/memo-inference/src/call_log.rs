//! In-memory record of generative API calls and daily token usage.
//!
//! The log lives for the lifetime of the process and is shared through an
//! `Arc<CallLogger>`; nothing is persisted. Daily usage is keyed by the UTC
//! calendar date of the call.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use memo_core::defaults::CALL_LOG_RECENT_LIMIT;

/// Kind of provider call being logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiOperation {
    Summarize,
    Tag,
    ClientInit,
}

impl ApiOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiOperation::Summarize => "summarize",
            ApiOperation::Tag => "tag",
            ApiOperation::ClientInit => "client_init",
        }
    }
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub operation: ApiOperation,
    pub success: bool,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Token totals for one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub date: NaiveDate,
    pub total_tokens: u64,
    pub summarize_tokens: u64,
    pub tag_tokens: u64,
    pub api_calls: u64,
}

impl TokenUsage {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_tokens: 0,
            summarize_tokens: 0,
            tag_tokens: 0,
            api_calls: 0,
        }
    }
}

/// Aggregate statistics over a trailing window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiStats {
    pub total_calls: usize,
    /// Percentage of successful calls, 0 when there were none.
    pub success_rate: f64,
    /// Mean duration in milliseconds, 0 when there were none.
    pub average_duration_ms: f64,
    pub total_tokens: u64,
    pub error_count: usize,
}

/// What a caller reports about a finished call; the logger adds the timestamp.
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub operation: ApiOperation,
    pub success: bool,
    pub duration_ms: u64,
    pub token_count: Option<u64>,
    pub error: Option<String>,
    pub model: Option<String>,
}

#[derive(Default)]
struct CallLogState {
    entries: Vec<ApiCallLog>,
    usage: BTreeMap<NaiveDate, TokenUsage>,
}

/// Shared call log.
#[derive(Default)]
pub struct CallLogger {
    state: RwLock<CallLogState>,
}

impl CallLogger {
    pub fn new() -> Self {
        Self::default()
    }

    // Writers never leave the state half-updated, so a poisoned lock is still
    // safe to use.
    fn read(&self) -> RwLockReadGuard<'_, CallLogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CallLogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a call stamped with the current time.
    pub fn record(&self, record: CallRecord) {
        self.record_at(record, Utc::now());
    }

    fn record_at(&self, record: CallRecord, timestamp: DateTime<Utc>) {
        debug!(
            subsystem = "inference",
            component = "call_log",
            op = %record.operation,
            success = record.success,
            duration_ms = record.duration_ms,
            token_count = record.token_count,
            model = record.model.as_deref(),
            error = record.error.as_deref(),
            "AI API call recorded"
        );

        let entry = ApiCallLog {
            timestamp,
            operation: record.operation,
            success: record.success,
            duration_ms: record.duration_ms,
            token_count: record.token_count,
            error: record.error,
            model: record.model,
        };

        let mut state = self.write();
        if let Some(tokens) = entry.token_count.filter(|t| *t > 0) {
            let date = timestamp.date_naive();
            let usage = state
                .usage
                .entry(date)
                .or_insert_with(|| TokenUsage::empty(date));
            usage.total_tokens += tokens;
            usage.api_calls += 1;
            match entry.operation {
                ApiOperation::Summarize => usage.summarize_tokens += tokens,
                ApiOperation::Tag => usage.tag_tokens += tokens,
                ApiOperation::ClientInit => {}
            }
        }
        state.entries.push(entry);
    }

    /// Record a successful call.
    pub fn log_success(
        &self,
        operation: ApiOperation,
        duration_ms: u64,
        token_count: Option<u64>,
        model: Option<&str>,
    ) {
        self.record(CallRecord {
            operation,
            success: true,
            duration_ms,
            token_count,
            error: None,
            model: model.map(str::to_string),
        });
    }

    /// Record a failed call with zero duration and emit an ERROR event.
    pub fn log_error(
        &self,
        operation: ApiOperation,
        message: &str,
        context: Option<&serde_json::Value>,
    ) {
        error!(
            subsystem = "inference",
            component = "call_log",
            op = %operation,
            error = message,
            context = ?context,
            "AI API call failed"
        );
        self.record(CallRecord {
            operation,
            success: false,
            duration_ms: 0,
            token_count: None,
            error: Some(message.to_string()),
            model: None,
        });
    }

    /// Most recent entries first, at most `limit` (default 50).
    pub fn recent_logs(&self, limit: Option<usize>) -> Vec<ApiCallLog> {
        let limit = limit.unwrap_or(CALL_LOG_RECENT_LIMIT);
        let mut entries = self.read().entries.clone();
        // stable sort keeps insertion order among equal timestamps
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);
        entries
    }

    /// Statistics over entries newer than `days` days ago.
    ///
    /// A window reaching past the representable calendar covers every entry.
    pub fn stats(&self, days: i64) -> ApiStats {
        let cutoff = cutoff(days);
        let state = self.read();

        let window: Vec<&ApiCallLog> = state
            .entries
            .iter()
            .filter(|e| cutoff.map_or(true, |c| e.timestamp >= c))
            .collect();
        let total_calls = window.len();
        if total_calls == 0 {
            return ApiStats::default();
        }

        let successes = window.iter().filter(|e| e.success).count();
        let total_duration: u64 = window.iter().map(|e| e.duration_ms).sum();
        let total_tokens: u64 = window.iter().filter_map(|e| e.token_count).sum();

        ApiStats {
            total_calls,
            success_rate: successes as f64 / total_calls as f64 * 100.0,
            average_duration_ms: total_duration as f64 / total_calls as f64,
            total_tokens,
            error_count: total_calls - successes,
        }
    }

    /// Drop entries and daily totals older than `days_to_keep` days.
    ///
    /// A day's totals are dropped once the start of that day falls before the
    /// cutoff. `0` empties both stores and a retention reaching past the
    /// representable calendar keeps everything. Returns the number of entries
    /// kept.
    pub fn cleanup(&self, days_to_keep: i64) -> usize {
        let mut state = self.write();

        if days_to_keep <= 0 {
            state.entries.clear();
            state.usage.clear();
        } else if let Some(cutoff) = cutoff(days_to_keep) {
            state.entries.retain(|e| e.timestamp >= cutoff);
            state
                .usage
                .retain(|date, _| date.and_time(NaiveTime::MIN).and_utc() >= cutoff);
        }

        let kept = state.entries.len();
        debug!(
            subsystem = "inference",
            component = "call_log",
            op = "cleanup",
            days_to_keep,
            kept,
            "Call log cleaned up"
        );
        kept
    }

    /// Totals for the current UTC day, if any tokens were recorded.
    pub fn today_token_usage(&self) -> Option<TokenUsage> {
        let today = Utc::now().date_naive();
        self.read().usage.get(&today).cloned()
    }
}

/// `days` before now, or `None` when that instant is out of range.
fn cutoff(days: i64) -> Option<DateTime<Utc>> {
    Duration::try_days(days).and_then(|window| Utc::now().checked_sub_signed(window))
}
