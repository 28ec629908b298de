//! Centralized default constants for memo.
//!
//! Every crate reads its limits and fallbacks from here instead of defining
//! its own magic numbers.

// =============================================================================
// NOTES
// =============================================================================

/// Maximum title length (characters) accepted when creating a note.
pub const TITLE_MAX_CREATE: usize = 200;

/// Maximum title length (characters) accepted when updating a note.
pub const TITLE_MAX_UPDATE: usize = 100;

/// Maximum content length (characters).
pub const CONTENT_MAX: usize = 10_000;

// =============================================================================
// PAGINATION
// =============================================================================

/// Notes per list page.
pub const PAGE_SIZE: i64 = 20;

/// Highest page number honoured; larger requests are clamped to it.
pub const MAX_PAGE: i64 = 1_000_000;

// =============================================================================
// TOKENS
// =============================================================================

/// Estimated tokens per whitespace-delimited word.
pub const TOKENS_PER_WORD: f64 = 1.3;

/// Token budget applied to note content before it is sent to the model.
pub const TOKEN_BUDGET: usize = 8000;

/// Marker appended to truncated text.
pub const TRUNCATION_MARKER: &str = "...";

// =============================================================================
// TAGS
// =============================================================================

/// Maximum tags kept per note.
pub const TAG_MAX_COUNT: usize = 6;

/// Minimum tag length (characters).
pub const TAG_MIN_LEN: usize = 2;

/// Maximum tag length (characters).
pub const TAG_MAX_LEN: usize = 20;

// =============================================================================
// SUMMARIES
// =============================================================================

/// Minimum summary length (characters) for the quality check.
pub const SUMMARY_MIN_LEN: usize = 10;

/// Maximum summary length (characters) for the quality check.
pub const SUMMARY_MAX_LEN: usize = 2000;

/// Minimum non-blank summary lines.
pub const SUMMARY_MIN_LINES: usize = 3;

/// Maximum non-blank summary lines.
pub const SUMMARY_MAX_LINES: usize = 6;

// =============================================================================
// GENERATION
// =============================================================================

/// Default Gemini model.
pub const GEN_MODEL: &str = "gemini-2.0-flash-001";

/// Default Gemini REST endpoint.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Key value shipped in sample env files; treated as "no key".
pub const GEMINI_PLACEHOLDER_KEY: &str = "your_gemini_api_key_here";

/// Model name reported on placeholder results.
pub const FALLBACK_MODEL: &str = "dev-fallback";

/// Sampling temperature for summaries.
pub const SUMMARY_TEMPERATURE: f32 = 0.3;

/// Output token cap for summaries.
pub const SUMMARY_MAX_OUTPUT_TOKENS: u32 = 500;

/// Sampling temperature for tags.
pub const TAG_TEMPERATURE: f32 = 0.2;

/// Output token cap for tags.
pub const TAG_MAX_OUTPUT_TOKENS: u32 = 200;

// =============================================================================
// CALL LOG
// =============================================================================

/// Entries returned by the recent-log listing when no limit is given.
pub const CALL_LOG_RECENT_LIMIT: usize = 50;

/// Window (days) used by call statistics when none is given.
pub const CALL_LOG_STATS_DAYS: i64 = 7;

/// Retention (days) used by cleanup when none is given.
pub const CALL_LOG_RETENTION_DAYS: i64 = 30;

/// Upper bound (days) accepted for stats windows and retention.
pub const CALL_LOG_MAX_DAYS: i64 = 36_500;

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const SERVER_PORT: u16 = 3000;

/// Maximum accepted request body (bytes).
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Default per-process capacity of the view cache (entries).
pub const VIEW_CACHE_CAPACITY: usize = 512;

/// Default database pool size.
pub const DB_MAX_CONNECTIONS: u32 = 5;
