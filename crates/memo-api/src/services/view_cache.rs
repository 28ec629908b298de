//! Per-user cache of rendered note views.
//!
//! List pages and note details are cached by owner. Every mutation drops the
//! owner's list pages and the touched note's detail, so a read after a write
//! never sees stale data from this process.
//!
//! Each invalidation also bumps the owner's generation. Readers take the
//! generation before querying and pass it back when storing; a view read
//! before a concurrent write finished is then discarded instead of cached.
//!
//! Capacity comes from `VIEW_CACHE_CAPACITY` (default 512); 0 disables caching.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lru::LruCache;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use memo_core::{NoteDetail, NotePage, NoteSortBy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ViewKey {
    List {
        user: Uuid,
        page: i64,
        sort: NoteSortBy,
    },
    Detail {
        user: Uuid,
        note: Uuid,
    },
}

impl ViewKey {
    fn user(&self) -> Uuid {
        match self {
            ViewKey::List { user, .. } | ViewKey::Detail { user, .. } => *user,
        }
    }
}

#[derive(Debug, Clone)]
enum CachedView {
    List(NotePage),
    Detail(NoteDetail),
}

/// Cache hit/miss counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Invalidation count of one user's views, taken before a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewGeneration(u64);

/// Shared view cache; cloning shares the underlying store.
#[derive(Clone)]
pub struct ViewCache {
    inner: Option<Arc<ViewCacheInner>>,
}

struct ViewCacheInner {
    state: Mutex<ViewState>,
    hits: AtomicU64,
    misses: AtomicU64,
}

struct ViewState {
    entries: LruCache<ViewKey, CachedView>,
    generations: HashMap<Uuid, u64>,
}

impl ViewState {
    fn generation(&self, user: Uuid) -> u64 {
        self.generations.get(&user).copied().unwrap_or(0)
    }

    fn bump(&mut self, user: Uuid) {
        *self.generations.entry(user).or_insert(0) += 1;
    }
}

impl ViewCache {
    /// Create an enabled cache holding at most `capacity` views (0 disables it).
    pub fn new(capacity: usize) -> Self {
        let Some(capacity) = NonZeroUsize::new(capacity) else {
            return Self::disabled();
        };
        Self {
            inner: Some(Arc::new(ViewCacheInner {
                state: Mutex::new(ViewState {
                    entries: LruCache::new(capacity),
                    generations: HashMap::new(),
                }),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
            })),
        }
    }

    /// A cache that stores nothing.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Current generation of `user`'s views.
    pub async fn generation(&self, user: Uuid) -> ViewGeneration {
        match &self.inner {
            Some(inner) => ViewGeneration(inner.state.lock().await.generation(user)),
            None => ViewGeneration(0),
        }
    }

    pub async fn get_list(&self, user: Uuid, page: i64, sort: NoteSortBy) -> Option<NotePage> {
        match self.get(ViewKey::List { user, page, sort }).await? {
            CachedView::List(page) => Some(page),
            CachedView::Detail(_) => None,
        }
    }

    /// Store a list page read under `observed`; ignored if `user` has been
    /// invalidated since.
    pub async fn put_list(
        &self,
        user: Uuid,
        sort: NoteSortBy,
        page: &NotePage,
        observed: ViewGeneration,
    ) {
        let key = ViewKey::List {
            user,
            page: page.current_page,
            sort,
        };
        self.put(key, CachedView::List(page.clone()), observed).await;
    }

    pub async fn get_detail(&self, user: Uuid, note: Uuid) -> Option<NoteDetail> {
        match self.get(ViewKey::Detail { user, note }).await? {
            CachedView::Detail(detail) => Some(detail),
            CachedView::List(_) => None,
        }
    }

    pub async fn put_detail(&self, user: Uuid, detail: &NoteDetail, observed: ViewGeneration) {
        let key = ViewKey::Detail {
            user,
            note: detail.note.id,
        };
        self.put(key, CachedView::Detail(detail.clone()), observed).await;
    }

    /// Drop every cached list page of `user`.
    pub async fn invalidate_lists(&self, user: Uuid) {
        self.invalidate_where(user, |key| matches!(key, ViewKey::List { .. }))
            .await;
    }

    /// Drop the cached detail of one note.
    pub async fn invalidate_detail(&self, user: Uuid, note: Uuid) {
        if let Some(inner) = &self.inner {
            let mut state = inner.state.lock().await;
            state.bump(user);
            state.entries.pop(&ViewKey::Detail { user, note });
            debug!(subsystem = "api", component = "view_cache", %user, %note, "Detail view invalidated");
        }
    }

    pub fn stats(&self) -> CacheStats {
        match &self.inner {
            Some(inner) => CacheStats {
                hits: inner.hits.load(Ordering::Relaxed),
                misses: inner.misses.load(Ordering::Relaxed),
            },
            None => CacheStats::default(),
        }
    }

    async fn get(&self, key: ViewKey) -> Option<CachedView> {
        let inner = self.inner.as_ref()?;
        let found = inner.state.lock().await.entries.get(&key).cloned();
        if found.is_some() {
            inner.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            inner.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    async fn put(&self, key: ViewKey, view: CachedView, observed: ViewGeneration) {
        let Some(inner) = &self.inner else {
            return;
        };
        let mut state = inner.state.lock().await;
        if state.generation(key.user()) != observed.0 {
            debug!(
                subsystem = "api",
                component = "view_cache",
                user = %key.user(),
                "Discarded view read before invalidation"
            );
            return;
        }
        state.entries.put(key, view);
    }

    async fn invalidate_where<F>(&self, user: Uuid, predicate: F)
    where
        F: Fn(&ViewKey) -> bool,
    {
        let Some(inner) = &self.inner else {
            return;
        };
        let mut state = inner.state.lock().await;
        state.bump(user);
        let doomed: Vec<ViewKey> = state
            .entries
            .iter()
            .map(|(key, _)| *key)
            .filter(|key| key.user() == user && predicate(key))
            .collect();
        for key in &doomed {
            state.entries.pop(key);
        }
        debug!(
            subsystem = "api",
            component = "view_cache",
            %user,
            removed = doomed.len(),
            "Views invalidated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use memo_core::Note;

    fn note(user: Uuid) -> Note {
        Note {
            id: Uuid::new_v4(),
            user_id: user,
            title: "t".into(),
            content: "c".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn detail(user: Uuid) -> NoteDetail {
        NoteDetail {
            note: note(user),
            tags: vec![],
            summary: None,
        }
    }

    #[tokio::test]
    async fn test_list_round_trip_and_stats() {
        let cache = ViewCache::new(8);
        let user = Uuid::new_v4();
        assert!(cache.get_list(user, 1, NoteSortBy::Newest).await.is_none());

        let page = NotePage::new(vec![note(user)], 1, 1);
        let generation = cache.generation(user).await;
        cache.put_list(user, NoteSortBy::Newest, &page, generation).await;
        let cached = cache.get_list(user, 1, NoteSortBy::Newest).await.unwrap();
        assert_eq!(cached.notes.len(), 1);
        assert!(cache.get_list(user, 1, NoteSortBy::Oldest).await.is_none());

        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 2 });
    }

    #[tokio::test]
    async fn test_invalidate_lists_is_per_user() {
        let cache = ViewCache::new(8);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let (ga, gb) = (cache.generation(alice).await, cache.generation(bob).await);
        cache.put_list(alice, NoteSortBy::Newest, &NotePage::new(vec![], 0, 1), ga).await;
        cache.put_list(bob, NoteSortBy::Newest, &NotePage::new(vec![], 0, 1), gb).await;
        let d = detail(alice);
        cache.put_detail(alice, &d, ga).await;

        cache.invalidate_lists(alice).await;

        assert!(cache.get_list(alice, 1, NoteSortBy::Newest).await.is_none());
        assert!(cache.get_list(bob, 1, NoteSortBy::Newest).await.is_some());
        assert!(cache.get_detail(alice, d.note.id).await.is_some());
    }

    #[tokio::test]
    async fn test_invalidate_detail() {
        let cache = ViewCache::new(8);
        let user = Uuid::new_v4();
        let d = detail(user);
        cache.put_detail(user, &d, cache.generation(user).await).await;
        cache.invalidate_detail(user, d.note.id).await;
        assert!(cache.get_detail(user, d.note.id).await.is_none());
    }

    #[tokio::test]
    async fn test_detail_not_shared_across_users() {
        let cache = ViewCache::new(8);
        let owner = Uuid::new_v4();
        let d = detail(owner);
        cache.put_detail(owner, &d, cache.generation(owner).await).await;
        assert!(cache.get_detail(Uuid::new_v4(), d.note.id).await.is_none());
    }

    #[tokio::test]
    async fn test_disabled_cache_stores_nothing() {
        let cache = ViewCache::new(0);
        assert!(!cache.is_enabled());
        let user = Uuid::new_v4();
        let generation = cache.generation(user).await;
        cache.put_list(user, NoteSortBy::Newest, &NotePage::new(vec![], 0, 1), generation).await;
        assert!(cache.get_list(user, 1, NoteSortBy::Newest).await.is_none());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[tokio::test]
    async fn test_put_after_invalidation_is_discarded() {
        let cache = ViewCache::new(8);
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let before = cache.generation(user).await;
        let other_before = cache.generation(other).await;

        // a write lands between the read and the store
        cache.invalidate_lists(user).await;
        cache
            .put_list(user, NoteSortBy::Newest, &NotePage::new(vec![], 0, 1), before)
            .await;
        let d = detail(user);
        cache.put_detail(user, &d, before).await;
        assert!(cache.get_list(user, 1, NoteSortBy::Newest).await.is_none());
        assert!(cache.get_detail(user, d.note.id).await.is_none());

        // other users are unaffected
        cache
            .put_list(other, NoteSortBy::Newest, &NotePage::new(vec![], 0, 1), other_before)
            .await;
        assert!(cache.get_list(other, 1, NoteSortBy::Newest).await.is_some());

        let after = cache.generation(user).await;
        assert_ne!(before, after);
        cache
            .put_list(user, NoteSortBy::Newest, &NotePage::new(vec![], 0, 1), after)
            .await;
        assert!(cache.get_list(user, 1, NoteSortBy::Newest).await.is_some());
    }
}
