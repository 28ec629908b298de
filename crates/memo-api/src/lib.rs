//! # memo-api
//!
//! HTTP surface for memo: owner-scoped note CRUD, AI summaries and tags,
//! the AI playground and call-log reporting, and onboarding status.
//!
//! The binary in `main.rs` wires configuration, storage, the Gemini
//! gateway and the auth provider into [`AppState`] and serves
//! [`router::build_router`].

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod services;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use router::build_router;
pub use state::{build_rate_limiter, AppState, GlobalRateLimiter};
