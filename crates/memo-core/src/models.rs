//! Core data models for memo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults;

// =============================================================================
// IDENTITY
// =============================================================================

/// The authenticated caller, as resolved by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Per-user profile row; created lazily on first note creation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub onboarding_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A user-owned note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored AI summary for a note (at most one per note).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Summary {
    pub id: Uuid,
    pub note_id: Uuid,
    pub model: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A note together with its tags and summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteDetail {
    #[serde(flatten)]
    pub note: Note,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

/// Validated, trimmed values for a new note.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
}

/// Sort order for note listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteSortBy {
    /// created_at descending
    #[default]
    Newest,
    /// created_at ascending
    Oldest,
    /// title ascending, created_at descending
    TitleAsc,
    /// title descending, created_at descending
    TitleDesc,
    /// updated_at descending
    Updated,
}

impl NoteSortBy {
    /// Parse a query-string value; anything unrecognised sorts newest first.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("oldest") => NoteSortBy::Oldest,
            Some("title-asc") => NoteSortBy::TitleAsc,
            Some("title-desc") => NoteSortBy::TitleDesc,
            Some("updated") => NoteSortBy::Updated,
            _ => NoteSortBy::Newest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteSortBy::Newest => "newest",
            NoteSortBy::Oldest => "oldest",
            NoteSortBy::TitleAsc => "title-asc",
            NoteSortBy::TitleDesc => "title-desc",
            NoteSortBy::Updated => "updated",
        }
    }
}

/// Request for one page of the caller's notes.
#[derive(Debug, Clone, Copy)]
pub struct ListNotesRequest {
    /// 1-based page number (already clamped)
    pub page: i64,
    pub sort: NoteSortBy,
}

impl ListNotesRequest {
    /// Build a request, clamping the page number into `1..=MAX_PAGE`.
    pub fn new(page: Option<i64>, sort: NoteSortBy) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, defaults::MAX_PAGE),
            sort,
        }
    }

    pub fn limit(&self) -> i64 {
        defaults::PAGE_SIZE
    }

    pub fn offset(&self) -> i64 {
        self.page
            .max(1)
            .saturating_sub(1)
            .saturating_mul(defaults::PAGE_SIZE)
    }
}

/// One page of notes plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotePage {
    pub notes: Vec<Note>,
    pub total_count: i64,
    pub current_page: i64,
    pub total_pages: i64,
}

impl NotePage {
    pub fn new(notes: Vec<Note>, total_count: i64, current_page: i64) -> Self {
        let total_pages = (total_count + defaults::PAGE_SIZE - 1) / defaults::PAGE_SIZE;
        Self {
            notes,
            total_count,
            current_page,
            total_pages,
        }
    }
}

// =============================================================================
// AI RESULTS
// =============================================================================

/// Parsed summary returned by the AI gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub content: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
    pub token_count: Option<usize>,
}

/// Parsed tag list returned by the AI gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagResponse {
    pub tags: Vec<String>,
    pub model: String,
    pub created_at: DateTime<Utc>,
    pub token_count: Option<usize>,
}

/// Summary and tags generated together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedArtifacts {
    pub summary: SummaryResponse,
    pub tags: TagResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_parse_known_values() {
        assert_eq!(NoteSortBy::parse(Some("oldest")), NoteSortBy::Oldest);
        assert_eq!(NoteSortBy::parse(Some("title-asc")), NoteSortBy::TitleAsc);
        assert_eq!(NoteSortBy::parse(Some("title-desc")), NoteSortBy::TitleDesc);
        assert_eq!(NoteSortBy::parse(Some("updated")), NoteSortBy::Updated);
        assert_eq!(NoteSortBy::parse(Some("newest")), NoteSortBy::Newest);
    }

    #[test]
    fn test_sort_parse_unknown_falls_back_to_newest() {
        assert_eq!(NoteSortBy::parse(None), NoteSortBy::Newest);
        assert_eq!(NoteSortBy::parse(Some("random")), NoteSortBy::Newest);
    }

    #[test]
    fn test_sort_round_trips_through_as_str() {
        for sort in [
            NoteSortBy::Newest,
            NoteSortBy::Oldest,
            NoteSortBy::TitleAsc,
            NoteSortBy::TitleDesc,
            NoteSortBy::Updated,
        ] {
            assert_eq!(NoteSortBy::parse(Some(sort.as_str())), sort);
        }
    }

    #[test]
    fn test_list_request_clamps_page() {
        assert_eq!(ListNotesRequest::new(Some(0), NoteSortBy::Newest).page, 1);
        assert_eq!(ListNotesRequest::new(Some(-3), NoteSortBy::Newest).page, 1);
        assert_eq!(ListNotesRequest::new(None, NoteSortBy::Newest).page, 1);
        assert_eq!(
            ListNotesRequest::new(Some(i64::MAX), NoteSortBy::Newest).page,
            defaults::MAX_PAGE
        );
    }

    #[test]
    fn test_list_request_offset_never_overflows() {
        let req = ListNotesRequest::new(Some(i64::MAX), NoteSortBy::Newest);
        assert_eq!(req.offset(), (defaults::MAX_PAGE - 1) * defaults::PAGE_SIZE);

        let raw = ListNotesRequest {
            page: i64::MAX,
            sort: NoteSortBy::Newest,
        };
        assert_eq!(raw.offset(), i64::MAX);
    }

    #[test]
    fn test_list_request_offset() {
        let req = ListNotesRequest::new(Some(3), NoteSortBy::Newest);
        assert_eq!(req.limit(), 20);
        assert_eq!(req.offset(), 40);
    }

    #[test]
    fn test_note_page_total_pages() {
        assert_eq!(NotePage::new(vec![], 45, 1).total_pages, 3);
        assert_eq!(NotePage::new(vec![], 40, 1).total_pages, 2);
        assert_eq!(NotePage::new(vec![], 0, 1).total_pages, 0);
        assert_eq!(NotePage::new(vec![], 1, 1).total_pages, 1);
    }
}
