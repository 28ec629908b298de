//! Note HTTP handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use memo_core::{GeneratedArtifacts, NoteDetail, NotePage, NoteSortBy};

use super::{ok, ok_empty, parse_note_id, ApiResponse};
use crate::auth::MaybeUser;
use crate::{ApiError, AppState};

/// Query parameters for listing notes.
#[derive(Debug, Default, Deserialize)]
pub struct ListNotesQuery {
    /// 1-based page; non-numeric values fall back to 1
    pub page: Option<String>,
    /// `newest` (default), `oldest`, `title-asc`, `title-desc`, `updated`
    pub sort: Option<String>,
}

/// Body for create and full update.
#[derive(Debug, Deserialize)]
pub struct NoteBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Body for content-only update.
#[derive(Debug, Deserialize)]
pub struct ContentBody {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedNote {
    pub note_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct NoteEnvelope {
    pub note: NoteDetail,
}

#[derive(Debug, Serialize)]
pub struct SummaryEnvelope {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct TagsEnvelope {
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RegeneratedEnvelope {
    pub summary: String,
    pub tags: Vec<String>,
}

impl From<GeneratedArtifacts> for RegeneratedEnvelope {
    fn from(artifacts: GeneratedArtifacts) -> Self {
        Self {
            summary: artifacts.summary.content,
            tags: artifacts.tags.tags,
        }
    }
}

/// List the caller's notes.
///
/// # Query Parameters
/// - `page`: 1-based page number (values below 1 become 1)
/// - `sort`: sort key; unknown values sort newest first
pub async fn list_notes(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<ListNotesQuery>,
) -> Result<Json<ApiResponse<NotePage>>, ApiError> {
    let page = query.page.as_deref().and_then(|p| p.trim().parse().ok());
    let sort = NoteSortBy::parse(query.sort.as_deref());
    let notes = state.notes.list(user.as_ref(), page, sort).await?;
    Ok(ok(notes))
}

/// Create a note.
///
/// # Returns
/// - 201 Created with `note_id`
/// - 400 Bad Request on validation failure
/// - 401 Unauthorized without a session
pub async fn create_note(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    body: Result<Json<NoteBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let note_id = state
        .notes
        .create(user.as_ref(), &body.title, &body.content)
        .await?;
    Ok((StatusCode::CREATED, ok(CreatedNote { note_id })))
}

/// Get a note with its tags and summary.
pub async fn get_note(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<NoteEnvelope>>, ApiError> {
    let id = parse_note_id(&id)?;
    let note = state.notes.get_detail(user.as_ref(), id).await?;
    Ok(ok(NoteEnvelope { note }))
}

/// Replace title and content (title limit 100 characters).
pub async fn update_note(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<String>,
    body: Result<Json<NoteBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_note_id(&id)?;
    let Json(body) = body?;
    state
        .notes
        .update(user.as_ref(), id, &body.title, &body.content)
        .await?;
    Ok(ok_empty())
}

/// Replace content only.
pub async fn update_note_content(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<String>,
    body: Result<Json<ContentBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_note_id(&id)?;
    let Json(body) = body?;
    state
        .notes
        .update_content_only(user.as_ref(), id, &body.content)
        .await?;
    Ok(ok_empty())
}

pub async fn delete_note(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_note_id(&id)?;
    state.notes.delete(user.as_ref(), id).await?;
    Ok(ok_empty())
}

/// Generate and store a summary.
///
/// # Returns
/// - 200 OK with `summary`
/// - 502 Bad Gateway when the provider fails
pub async fn generate_summary(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SummaryEnvelope>>, ApiError> {
    let id = parse_note_id(&id)?;
    let summary = state
        .notes
        .generate_summary_for_note(user.as_ref(), id)
        .await?;
    Ok(ok(SummaryEnvelope { summary }))
}

/// Generate and store tags.
pub async fn generate_tags(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<TagsEnvelope>>, ApiError> {
    let id = parse_note_id(&id)?;
    let tags = state.notes.generate_tags_for_note(user.as_ref(), id).await?;
    Ok(ok(TagsEnvelope { tags }))
}

/// Generate summary and tags together without storing them.
pub async fn regenerate(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RegeneratedEnvelope>>, ApiError> {
    let id = parse_note_id(&id)?;
    let artifacts = state.notes.regenerate_both(user.as_ref(), id).await?;
    Ok(ok(artifacts.into()))
}
