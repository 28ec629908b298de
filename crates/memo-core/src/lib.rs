//! # memo-core
//!
//! Core types, traits, and text utilities for the memo notes service.
//!
//! This crate holds everything that does not touch the network or the
//! database: the error taxonomy, domain models, repository and backend
//! traits, input validation, token estimation, and the parsers that turn
//! free-text model output into summaries and tag lists.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod summary;
pub mod tags;
pub mod tokens;
pub mod traits;
pub mod validation;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use summary::{parse_summary, validate_summary_quality};
pub use tags::{normalize_tags, parse_tags, validate_tag_quality, QualityReport};
pub use tokens::{estimate_tokens, exceeds_token_limit, truncate_to_token_limit};
pub use traits::*;
pub use validation::{validate_content_only, validate_note, TitleLimit};
