//! In-memory storage and service builders for memo-api tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use memo_api::services::{GenerationService, NoteService, Repositories, ViewCache};
use memo_core::{
    CurrentUser, Error, ListNotesRequest, NewNote, Note, NoteRepository, NoteSortBy,
    ProfileRepository, Result, Summary, SummaryRepository, TagRepository, UserProfile,
};
use memo_inference::mock::MockGenerationBackend;
use memo_inference::{AiGateway, CallLogger};

#[derive(Default)]
struct State {
    notes: HashMap<Uuid, Note>,
    profiles: HashMap<Uuid, UserProfile>,
    tags: HashMap<Uuid, Vec<String>>,
    summaries: HashMap<Uuid, Summary>,
    /// Monotonic counter so created_at values are distinct and ordered.
    clock: i64,
    fail_writes: bool,
}

/// All four repositories over one shared map, with notes cascading to tags
/// and summaries on delete.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write fail as if the database were unreachable.
    pub fn fail_writes(&self) {
        self.state.lock().unwrap().fail_writes = true;
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            notes: Arc::new(self.clone()),
            profiles: Arc::new(self.clone()),
            tags: Arc::new(self.clone()),
            summaries: Arc::new(self.clone()),
        }
    }

    /// Repositories whose note listing and counting take a snapshot, then
    /// stall for `delay` before answering.
    pub fn repositories_with_slow_reads(&self, delay: std::time::Duration) -> Repositories {
        Repositories {
            notes: Arc::new(SlowReads {
                store: self.clone(),
                delay,
            }),
            ..self.repositories()
        }
    }

    pub fn note_count(&self) -> usize {
        self.state.lock().unwrap().notes.len()
    }

    pub fn has_profile(&self, user: Uuid) -> bool {
        self.state.lock().unwrap().profiles.contains_key(&user)
    }

    pub fn tags_of(&self, note: Uuid) -> Option<Vec<String>> {
        self.state.lock().unwrap().tags.get(&note).cloned()
    }

    pub fn summary_of(&self, note: Uuid) -> Option<Summary> {
        self.state.lock().unwrap().summaries.get(&note).cloned()
    }

    pub fn stored(&self, note: Uuid) -> Option<Note> {
        self.state.lock().unwrap().notes.get(&note).cloned()
    }

    fn check_writable(state: &State) -> Result<()> {
        if state.fail_writes {
            return Err(Error::Internal("connection refused".to_string()));
        }
        Ok(())
    }
}

/// Note storage whose list and count answers arrive late and stale.
pub struct SlowReads {
    store: MemoryStore,
    delay: std::time::Duration,
}

#[async_trait]
impl NoteRepository for SlowReads {
    async fn insert(&self, note: NewNote) -> Result<Uuid> {
        self.store.insert(note).await
    }

    async fn fetch(&self, owner: Uuid, id: Uuid) -> Result<Option<Note>> {
        self.store.fetch(owner, id).await
    }

    async fn list(&self, owner: Uuid, req: ListNotesRequest) -> Result<Vec<Note>> {
        let notes = self.store.list(owner, req).await;
        tokio::time::sleep(self.delay).await;
        notes
    }

    async fn count(&self, owner: Uuid) -> Result<i64> {
        let count = self.store.count(owner).await;
        tokio::time::sleep(self.delay).await;
        count
    }

    async fn update(&self, owner: Uuid, id: Uuid, title: &str, content: &str) -> Result<bool> {
        self.store.update(owner, id, title, content).await
    }

    async fn update_content(&self, owner: Uuid, id: Uuid, content: &str) -> Result<bool> {
        self.store.update_content(owner, id, content).await
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool> {
        self.store.delete(owner, id).await
    }
}

#[async_trait]
impl NoteRepository for MemoryStore {
    async fn insert(&self, note: NewNote) -> Result<Uuid> {
        let mut state = self.state.lock().unwrap();
        Self::check_writable(&state)?;
        state.clock += 1;
        let at = Utc::now() + Duration::seconds(state.clock);
        let id = Uuid::new_v4();
        state.notes.insert(
            id,
            Note {
                id,
                user_id: note.user_id,
                title: note.title,
                content: note.content,
                created_at: at,
                updated_at: at,
            },
        );
        Ok(id)
    }

    async fn fetch(&self, owner: Uuid, id: Uuid) -> Result<Option<Note>> {
        let state = self.state.lock().unwrap();
        Ok(state.notes.get(&id).filter(|n| n.user_id == owner).cloned())
    }

    async fn list(&self, owner: Uuid, req: ListNotesRequest) -> Result<Vec<Note>> {
        let state = self.state.lock().unwrap();
        let mut notes: Vec<Note> = state
            .notes
            .values()
            .filter(|n| n.user_id == owner)
            .cloned()
            .collect();
        match req.sort {
            NoteSortBy::Newest => notes.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            NoteSortBy::Oldest => notes.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            NoteSortBy::TitleAsc => notes.sort_by(|a, b| {
                a.title.cmp(&b.title).then(b.created_at.cmp(&a.created_at))
            }),
            NoteSortBy::TitleDesc => notes.sort_by(|a, b| {
                b.title.cmp(&a.title).then(b.created_at.cmp(&a.created_at))
            }),
            NoteSortBy::Updated => notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        }
        Ok(notes
            .into_iter()
            .skip(req.offset() as usize)
            .take(req.limit() as usize)
            .collect())
    }

    async fn count(&self, owner: Uuid) -> Result<i64> {
        let state = self.state.lock().unwrap();
        Ok(state.notes.values().filter(|n| n.user_id == owner).count() as i64)
    }

    async fn update(&self, owner: Uuid, id: Uuid, title: &str, content: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        Self::check_writable(&state)?;
        state.clock += 1;
        let at = Utc::now() + Duration::seconds(state.clock);
        match state.notes.get_mut(&id).filter(|n| n.user_id == owner) {
            Some(note) => {
                note.title = title.to_string();
                note.content = content.to_string();
                note.updated_at = at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_content(&self, owner: Uuid, id: Uuid, content: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        Self::check_writable(&state)?;
        state.clock += 1;
        let at = Utc::now() + Duration::seconds(state.clock);
        match state.notes.get_mut(&id).filter(|n| n.user_id == owner) {
            Some(note) => {
                note.content = content.to_string();
                note.updated_at = at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        Self::check_writable(&state)?;
        let owned = state.notes.get(&id).is_some_and(|n| n.user_id == owner);
        if !owned {
            return Ok(false);
        }
        state.notes.remove(&id);
        state.tags.remove(&id);
        state.summaries.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn ensure_exists(&self, user_id: Uuid) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_writable(&state)?;
        let now = Utc::now();
        state.profiles.entry(user_id).or_insert(UserProfile {
            id: user_id,
            onboarding_completed: false,
            created_at: now,
            updated_at: now,
        });
        Ok(())
    }

    async fn get(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        Ok(self.state.lock().unwrap().profiles.get(&user_id).cloned())
    }

    async fn complete_onboarding(&self, user_id: Uuid) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_writable(&state)?;
        let now = Utc::now();
        let profile = state.profiles.entry(user_id).or_insert(UserProfile {
            id: user_id,
            onboarding_completed: false,
            created_at: now,
            updated_at: now,
        });
        profile.onboarding_completed = true;
        profile.updated_at = now;
        Ok(())
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn set_for_note(&self, note_id: Uuid, tags: &[String]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_writable(&state)?;
        state.tags.insert(note_id, tags.to_vec());
        Ok(())
    }

    async fn get_for_note(&self, note_id: Uuid) -> Result<Vec<String>> {
        let state = self.state.lock().unwrap();
        let mut tags = state.tags.get(&note_id).cloned().unwrap_or_default();
        tags.sort();
        Ok(tags)
    }
}

#[async_trait]
impl SummaryRepository for MemoryStore {
    async fn upsert(&self, note_id: Uuid, model: &str, content: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_writable(&state)?;
        let id = state
            .summaries
            .get(&note_id)
            .map(|s| s.id)
            .unwrap_or_else(Uuid::new_v4);
        state.summaries.insert(
            note_id,
            Summary {
                id,
                note_id,
                model: model.to_string(),
                content: content.to_string(),
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn get_for_note(&self, note_id: Uuid) -> Result<Option<Summary>> {
        Ok(self.state.lock().unwrap().summaries.get(&note_id).cloned())
    }
}

pub const SUMMARY_TEXT: &str = "Launch moved to Friday.\nQA signs off Thursday.\nDocs ship with the release.";
pub const TAG_TEXT: &str = "Release, Planning; QA";

/// Backend answering summary prompts with [`SUMMARY_TEXT`] and tag prompts with [`TAG_TEXT`].
pub fn scripted_backend() -> MockGenerationBackend {
    MockGenerationBackend::new()
        .with_response_for("Summary:", SUMMARY_TEXT)
        .with_response_for("Tags:", TAG_TEXT)
}

pub fn generation(backend: MockGenerationBackend) -> GenerationService {
    GenerationService::new(
        AiGateway::new(Some(Arc::new(backend))),
        Arc::new(CallLogger::new()),
    )
}

pub fn note_service(store: &MemoryStore, backend: MockGenerationBackend) -> NoteService {
    NoteService::new(store.repositories(), generation(backend), ViewCache::new(64))
}

pub fn user() -> CurrentUser {
    CurrentUser {
        id: Uuid::new_v4(),
        email: Some("someone@example.com".to_string()),
    }
}
