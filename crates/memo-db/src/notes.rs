//! Note repository implementation.
//!
//! Every statement carries `user_id = $owner` in its predicate. Updates and
//! deletes are single conditional statements; the affected row count tells
//! the caller whether an owned note matched.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use memo_core::{Error, ListNotesRequest, NewNote, Note, NoteRepository, NoteSortBy, Result};

const NOTE_COLUMNS: &str = "id, user_id, title, content, created_at, updated_at";

/// ORDER BY clause for a sort option.
fn order_clause(sort: NoteSortBy) -> &'static str {
    match sort {
        NoteSortBy::Newest => "created_at DESC",
        NoteSortBy::Oldest => "created_at ASC",
        NoteSortBy::TitleAsc => "title ASC, created_at DESC",
        NoteSortBy::TitleDesc => "title DESC, created_at DESC",
        NoteSortBy::Updated => "updated_at DESC",
    }
}

/// PostgreSQL implementation of NoteRepository.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, note: NewNote) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO notes (id, user_id, title, content, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)",
        )
        .bind(id)
        .bind(note.user_id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(id)
    }

    async fn fetch(&self, owner: Uuid, id: Uuid) -> Result<Option<Note>> {
        let query = format!(
            "SELECT {} FROM notes WHERE id = $1 AND user_id = $2",
            NOTE_COLUMNS
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn list(&self, owner: Uuid, req: ListNotesRequest) -> Result<Vec<Note>> {
        let query = format!(
            "SELECT {} FROM notes WHERE user_id = $1 ORDER BY {} LIMIT $2 OFFSET $3",
            NOTE_COLUMNS,
            order_clause(req.sort)
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(owner)
            .bind(req.limit())
            .bind(req.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn count(&self, owner: Uuid) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE user_id = $1")
            .bind(owner)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn update(&self, owner: Uuid, id: Uuid, title: &str, content: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE notes SET title = $1, content = $2, updated_at = $3
             WHERE id = $4 AND user_id = $5",
        )
        .bind(title)
        .bind(content)
        .bind(Utc::now())
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_content(&self, owner: Uuid, id: Uuid, content: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE notes SET content = $1, updated_at = $2 WHERE id = $3 AND user_id = $4",
        )
        .bind(content)
        .bind(Utc::now())
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clause_per_sort() {
        assert_eq!(order_clause(NoteSortBy::Newest), "created_at DESC");
        assert_eq!(order_clause(NoteSortBy::Oldest), "created_at ASC");
        assert_eq!(order_clause(NoteSortBy::TitleAsc), "title ASC, created_at DESC");
        assert_eq!(order_clause(NoteSortBy::TitleDesc), "title DESC, created_at DESC");
        assert_eq!(order_clause(NoteSortBy::Updated), "updated_at DESC");
    }
}
