//! Structured logging field names shared by every memo crate.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Failed operation the caller sees as an error |
//! | WARN  | Recoverable issue, fallback applied |
//! | INFO  | Lifecycle events and completed mutations |
//! | DEBUG | Decision points, call log records |
//! | TRACE | High-volume detail |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID attached by the HTTP layer (UUIDv7).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "db", "inference"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "gemini", "gateway", "call_log", "pool", "notes"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "create", "list", "summarize", "tag"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Note UUID being operated on.
pub const NOTE_ID: &str = "note_id";

/// Authenticated user UUID.
pub const USER_ID: &str = "user_id";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Estimated token count of a generation.
pub const TOKEN_COUNT: &str = "token_count";

/// Number of rows returned by a query.
pub const RESULT_COUNT: &str = "result_count";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for generation.
pub const MODEL: &str = "model";

/// Whether the call succeeded.
pub const SUCCESS: &str = "success";

/// Error message, when an operation failed.
pub const ERROR: &str = "error";
