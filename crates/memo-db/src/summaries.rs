//! Note summary repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use memo_core::{Error, Result, Summary, SummaryRepository};

/// PostgreSQL implementation of SummaryRepository.
#[derive(Clone)]
pub struct PgSummaryRepository {
    pool: Pool<Postgres>,
}

impl PgSummaryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SummaryRepository for PgSummaryRepository {
    async fn upsert(&self, note_id: Uuid, model: &str, content: &str) -> Result<()> {
        // one summary per note; regenerating replaces it
        sqlx::query(
            "INSERT INTO summaries (id, note_id, model, content, created_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (note_id) DO UPDATE
             SET model = EXCLUDED.model, content = EXCLUDED.content, created_at = EXCLUDED.created_at",
        )
        .bind(Uuid::new_v4())
        .bind(note_id)
        .bind(model)
        .bind(content)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }

    async fn get_for_note(&self, note_id: Uuid) -> Result<Option<Summary>> {
        sqlx::query_as::<_, Summary>(
            "SELECT id, note_id, model, content, created_at FROM summaries WHERE note_id = $1",
        )
        .bind(note_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)
    }
}
