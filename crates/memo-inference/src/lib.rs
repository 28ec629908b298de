//! # memo-inference
//!
//! Generative AI plumbing for memo:
//!
//! - [`gemini::GeminiBackend`]: HTTP client for the Gemini `generateContent` API
//! - [`gateway::AiGateway`]: summary and tag generation with a placeholder
//!   fallback when no API key is configured
//! - [`call_log::CallLogger`]: in-memory record of provider calls and daily
//!   token usage
//!
//! ## Example
//!
//! ```rust,ignore
//! use memo_inference::{AiGateway, CallLogger, GeminiConfig};
//!
//! let call_log = CallLogger::new();
//! let gateway = AiGateway::initialize(&GeminiConfig::from_env(), &call_log);
//! let summary = gateway.summarize("Long meeting notes ...").await?;
//! println!("{}", summary.content);
//! ```

pub mod call_log;
pub mod config;
pub mod gateway;
pub mod gemini;
pub mod prompts;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use call_log::{ApiCallLog, ApiOperation, ApiStats, CallLogger, CallRecord, TokenUsage};
pub use config::GeminiConfig;
pub use gateway::AiGateway;
pub use gemini::GeminiBackend;

// Re-export core traits
pub use memo_core::{GenerationBackend, GenerationParams};
