//! Core traits for memo abstractions.
//!
//! Repositories, the generation backend and the auth provider are all
//! reached through these traits so that services can be exercised against
//! in-memory doubles.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// REPOSITORY TRAITS
// =============================================================================

/// Owner-scoped note storage.
///
/// Every method takes the owner id and must include it in the row predicate.
/// A note owned by someone else is indistinguishable from a missing one.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a note and return its generated id.
    async fn insert(&self, note: NewNote) -> Result<Uuid>;

    /// Fetch one note by id within the owner's scope.
    async fn fetch(&self, owner: Uuid, id: Uuid) -> Result<Option<Note>>;

    /// One page of the owner's notes in the requested order.
    async fn list(&self, owner: Uuid, req: ListNotesRequest) -> Result<Vec<Note>>;

    /// Count the owner's notes.
    async fn count(&self, owner: Uuid) -> Result<i64>;

    /// Replace title and content; returns false when no owned row matched.
    async fn update(&self, owner: Uuid, id: Uuid, title: &str, content: &str) -> Result<bool>;

    /// Replace content only; returns false when no owned row matched.
    async fn update_content(&self, owner: Uuid, id: Uuid, content: &str) -> Result<bool>;

    /// Delete a note (cascading to tags and summary); false when no owned row matched.
    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool>;
}

/// User profile storage.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Create the profile row if it does not already exist.
    async fn ensure_exists(&self, user_id: Uuid) -> Result<()>;

    async fn get(&self, user_id: Uuid) -> Result<Option<UserProfile>>;

    /// Mark onboarding as completed, creating the profile if needed.
    async fn complete_onboarding(&self, user_id: Uuid) -> Result<()>;
}

/// Per-note tag storage.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Replace all tags of a note.
    async fn set_for_note(&self, note_id: Uuid, tags: &[String]) -> Result<()>;

    /// Tags of a note in alphabetical order.
    async fn get_for_note(&self, note_id: Uuid) -> Result<Vec<String>>;
}

/// Per-note summary storage (at most one per note).
#[async_trait]
pub trait SummaryRepository: Send + Sync {
    /// Insert or replace the summary of a note.
    async fn upsert(&self, note_id: Uuid, model: &str, content: &str) -> Result<()>;

    async fn get_for_note(&self, note_id: Uuid) -> Result<Option<Summary>>;
}

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// Sampling parameters for one generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Backend for text generation (LLM).
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text for a prompt. Provider failures surface as `Error::Inference`.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

// =============================================================================
// AUTH TRAITS
// =============================================================================

/// Resolves a session token to the current user.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// `Ok(None)` when the token is unknown or expired.
    async fn current_user(&self, token: &str) -> Result<Option<CurrentUser>>;
}
