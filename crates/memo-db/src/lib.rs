//! # memo-db
//!
//! PostgreSQL storage layer for memo.
//!
//! This crate provides:
//! - Connection pool management
//! - Owner-scoped repository implementations for notes, profiles, tags and summaries
//! - Embedded schema migrations (behind the `migrations` feature)
//!
//! ## Example
//!
//! ```rust,ignore
//! use memo_db::{Database, PoolConfig};
//! use memo_core::{NewNote, NoteRepository};
//!
//! let db = Database::connect("postgres://localhost/memo", PoolConfig::default()).await?;
//! let id = db.notes.insert(NewNote {
//!     user_id,
//!     title: "Groceries".to_string(),
//!     content: "milk, eggs".to_string(),
//! }).await?;
//! ```

pub mod notes;
pub mod pool;
pub mod profiles;
pub mod summaries;
pub mod tags;
pub mod test_fixtures;

pub use memo_core::*;
pub use notes::PgNoteRepository;
pub use pool::{create_pool, log_pool_metrics, PoolConfig};
pub use profiles::PgProfileRepository;
pub use summaries::PgSummaryRepository;
pub use tags::PgTagRepository;

use sqlx::{Pool, Postgres};

/// Aggregate of every repository sharing one pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool<Postgres>,
    pub notes: PgNoteRepository,
    pub profiles: PgProfileRepository,
    pub tags: PgTagRepository,
    pub summaries: PgSummaryRepository,
}

impl Database {
    /// Wrap an existing pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            notes: PgNoteRepository::new(pool.clone()),
            profiles: PgProfileRepository::new(pool.clone()),
            tags: PgTagRepository::new(pool.clone()),
            summaries: PgSummaryRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}
