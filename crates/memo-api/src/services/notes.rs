//! Note actions.
//!
//! Every action resolves the caller first and scopes all storage access to
//! the caller's id. Storage failures are logged with their cause and turned
//! into a per-action message that is safe to show.

use std::sync::Arc;

use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use memo_core::{
    normalize_tags, validate_content_only, validate_note, CurrentUser, Error, GeneratedArtifacts, ListNotesRequest,
    NewNote, Note, NoteDetail, NotePage, NoteRepository, NoteSortBy, ProfileRepository, Result,
    SummaryRepository, TagRepository, TitleLimit,
};
use memo_db::Database;

use super::generation::GenerationService;
use super::view_cache::ViewCache;

const SAVE_FAILED: &str = "Failed to save the note. Please try again later.";
const LIST_FAILED: &str = "Failed to load notes. Please try again later.";
const LOAD_FAILED: &str = "Failed to load the note. Please try again later.";
const UPDATE_FAILED: &str = "Failed to update the note. Please try again later.";
const DELETE_FAILED: &str = "Failed to delete the note. Please try again later.";
const ONBOARDING_FAILED: &str = "Failed to update onboarding status. Please try again later.";
const NOT_FOUND: &str = "Note not found.";

/// Storage collaborators of [`NoteService`].
#[derive(Clone)]
pub struct Repositories {
    pub notes: Arc<dyn NoteRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub summaries: Arc<dyn SummaryRepository>,
}

impl Repositories {
    pub fn from_database(db: &Database) -> Self {
        Self {
            notes: Arc::new(db.notes.clone()),
            profiles: Arc::new(db.profiles.clone()),
            tags: Arc::new(db.tags.clone()),
            summaries: Arc::new(db.summaries.clone()),
        }
    }
}

/// Owner-scoped note actions.
#[derive(Clone)]
pub struct NoteService {
    repos: Repositories,
    generation: GenerationService,
    views: ViewCache,
}

fn require_user(caller: Option<&CurrentUser>) -> Result<&CurrentUser> {
    caller.ok_or(Error::AuthenticationRequired)
}

/// Log a storage failure and replace it with `message`.
fn persistence(op: &'static str, message: &'static str) -> impl FnOnce(Error) -> Error {
    move |e| {
        error!(subsystem = "api", component = "notes", op, error = %e, "Storage operation failed");
        Error::Persistence(message.to_string())
    }
}

fn not_found() -> Error {
    Error::NotFound(NOT_FOUND.to_string())
}

impl NoteService {
    pub fn new(repos: Repositories, generation: GenerationService, views: ViewCache) -> Self {
        Self {
            repos,
            generation,
            views,
        }
    }

    pub fn views(&self) -> &ViewCache {
        &self.views
    }

    /// Create a note and return its id.
    #[instrument(skip_all, fields(subsystem = "api", op = "create_note"))]
    pub async fn create(
        &self,
        caller: Option<&CurrentUser>,
        title: &str,
        content: &str,
    ) -> Result<Uuid> {
        let user = require_user(caller)?;
        validate_note(title, content, TitleLimit::Create)?;

        self.repos
            .profiles
            .ensure_exists(user.id)
            .await
            .map_err(persistence("create_note", SAVE_FAILED))?;

        let id = self
            .repos
            .notes
            .insert(NewNote {
                user_id: user.id,
                title: title.trim().to_string(),
                content: content.trim().to_string(),
            })
            .await
            .map_err(persistence("create_note", SAVE_FAILED))?;

        self.views.invalidate_lists(user.id).await;
        info!(note_id = %id, user_id = %user.id, "Note created");
        Ok(id)
    }

    /// One page of the caller's notes; pages below 1 are treated as 1.
    pub async fn list(
        &self,
        caller: Option<&CurrentUser>,
        page: Option<i64>,
        sort: NoteSortBy,
    ) -> Result<NotePage> {
        let user = require_user(caller)?;
        let req = ListNotesRequest::new(page, sort);

        if let Some(cached) = self.views.get_list(user.id, req.page, sort).await {
            return Ok(cached);
        }
        let seen = self.views.generation(user.id).await;

        let (notes, total) = tokio::try_join!(
            self.repos.notes.list(user.id, req),
            self.repos.notes.count(user.id)
        )
        .map_err(persistence("list_notes", LIST_FAILED))?;

        let page = NotePage::new(notes, total, req.page);
        debug!(
            subsystem = "api",
            component = "notes",
            user_id = %user.id,
            result_count = page.notes.len(),
            total_count = page.total_count,
            sort = sort.as_str(),
            "Listed notes"
        );
        self.views.put_list(user.id, sort, &page, seen).await;
        Ok(page)
    }

    /// One note owned by the caller.
    pub async fn get_by_id(&self, caller: Option<&CurrentUser>, id: Uuid) -> Result<Note> {
        let user = require_user(caller)?;
        self.fetch_owned(user, id).await
    }

    /// A note with its tags and summary.
    pub async fn get_detail(&self, caller: Option<&CurrentUser>, id: Uuid) -> Result<NoteDetail> {
        let user = require_user(caller)?;
        if let Some(cached) = self.views.get_detail(user.id, id).await {
            return Ok(cached);
        }
        let seen = self.views.generation(user.id).await;

        let note = self.fetch_owned(user, id).await?;
        let (tags, summary) = tokio::try_join!(
            self.repos.tags.get_for_note(id),
            self.repos.summaries.get_for_note(id)
        )
        .map_err(persistence("get_note_detail", LOAD_FAILED))?;

        let detail = NoteDetail { note, tags, summary };
        self.views.put_detail(user.id, &detail, seen).await;
        Ok(detail)
    }

    /// Replace title and content.
    #[instrument(skip_all, fields(subsystem = "api", op = "update_note", note_id = %id))]
    pub async fn update(
        &self,
        caller: Option<&CurrentUser>,
        id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<()> {
        let user = require_user(caller)?;
        validate_note(title, content, TitleLimit::Update)?;

        let updated = self
            .repos
            .notes
            .update(user.id, id, title.trim(), content.trim())
            .await
            .map_err(persistence("update_note", UPDATE_FAILED))?;
        if !updated {
            return Err(not_found());
        }

        self.invalidate(user.id, id).await;
        Ok(())
    }

    /// Replace content only. Only emptiness is checked here.
    #[instrument(skip_all, fields(subsystem = "api", op = "update_note_content", note_id = %id))]
    pub async fn update_content_only(
        &self,
        caller: Option<&CurrentUser>,
        id: Uuid,
        content: &str,
    ) -> Result<()> {
        let user = require_user(caller)?;
        validate_content_only(content)?;

        let updated = self
            .repos
            .notes
            .update_content(user.id, id, content.trim())
            .await
            .map_err(persistence("update_note_content", UPDATE_FAILED))?;
        if !updated {
            return Err(not_found());
        }

        self.invalidate(user.id, id).await;
        Ok(())
    }

    /// Delete a note together with its tags and summary.
    #[instrument(skip_all, fields(subsystem = "api", op = "delete_note", note_id = %id))]
    pub async fn delete(&self, caller: Option<&CurrentUser>, id: Uuid) -> Result<()> {
        let user = require_user(caller)?;
        let deleted = self
            .repos
            .notes
            .delete(user.id, id)
            .await
            .map_err(persistence("delete_note", DELETE_FAILED))?;
        if !deleted {
            return Err(not_found());
        }

        self.invalidate(user.id, id).await;
        info!(user_id = %user.id, "Note deleted");
        Ok(())
    }

    /// Generate and store the summary of a note; returns the summary text.
    #[instrument(skip_all, fields(subsystem = "api", op = "generate_summary", note_id = %id))]
    pub async fn generate_summary_for_note(
        &self,
        caller: Option<&CurrentUser>,
        id: Uuid,
    ) -> Result<String> {
        let user = require_user(caller)?;
        let note = self.fetch_owned(user, id).await?;
        require_content(&note)?;

        let summary = self.generation.summarize(&note.content).await?;
        self.repos
            .summaries
            .upsert(id, &summary.model, &summary.content)
            .await
            .map_err(persistence("generate_summary", SAVE_FAILED))?;

        self.invalidate(user.id, id).await;
        Ok(summary.content)
    }

    /// Generate and store the tags of a note, replacing existing ones.
    #[instrument(skip_all, fields(subsystem = "api", op = "generate_tags", note_id = %id))]
    pub async fn generate_tags_for_note(
        &self,
        caller: Option<&CurrentUser>,
        id: Uuid,
    ) -> Result<Vec<String>> {
        let user = require_user(caller)?;
        let note = self.fetch_owned(user, id).await?;
        require_content(&note)?;

        let generated = self.generation.tags(&note.content).await?;
        let tags = normalize_tags(&generated.tags);
        self.repos
            .tags
            .set_for_note(id, &tags)
            .await
            .map_err(persistence("generate_tags", SAVE_FAILED))?;

        self.invalidate(user.id, id).await;
        Ok(tags)
    }

    /// Generate summary and tags concurrently. Results are returned, not stored.
    #[instrument(skip_all, fields(subsystem = "api", op = "regenerate", note_id = %id))]
    pub async fn regenerate_both(
        &self,
        caller: Option<&CurrentUser>,
        id: Uuid,
    ) -> Result<GeneratedArtifacts> {
        let user = require_user(caller)?;
        let note = self.fetch_owned(user, id).await?;
        require_content(&note)?;

        let artifacts = self.generation.both(&note.content).await?;
        self.invalidate(user.id, id).await;
        Ok(artifacts)
    }

    pub async fn complete_onboarding(&self, caller: Option<&CurrentUser>) -> Result<()> {
        let user = require_user(caller)?;
        self.repos
            .profiles
            .complete_onboarding(user.id)
            .await
            .map_err(persistence("complete_onboarding", ONBOARDING_FAILED))?;
        info!(subsystem = "api", user_id = %user.id, "Onboarding completed");
        Ok(())
    }

    /// Skipping marks onboarding as done.
    pub async fn skip_onboarding(&self, caller: Option<&CurrentUser>) -> Result<()> {
        self.complete_onboarding(caller).await
    }

    /// False for anonymous callers and callers without a profile.
    pub async fn onboarding_status(&self, caller: Option<&CurrentUser>) -> Result<bool> {
        let Some(user) = caller else {
            return Ok(false);
        };
        let profile = self
            .repos
            .profiles
            .get(user.id)
            .await
            .map_err(persistence("onboarding_status", LOAD_FAILED))?;
        Ok(profile.map(|p| p.onboarding_completed).unwrap_or(false))
    }

    async fn fetch_owned(&self, user: &CurrentUser, id: Uuid) -> Result<Note> {
        self.repos
            .notes
            .fetch(user.id, id)
            .await
            .map_err(persistence("get_note", LOAD_FAILED))?
            .ok_or_else(not_found)
    }

    async fn invalidate(&self, user: Uuid, note: Uuid) {
        self.views.invalidate_lists(user).await;
        self.views.invalidate_detail(user, note).await;
    }
}

fn require_content(note: &Note) -> Result<()> {
    if note.content.trim().is_empty() {
        return Err(Error::validation("content", "The note has no content."));
    }
    Ok(())
}
