//! User profile repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use memo_core::{Error, ProfileRepository, Result, UserProfile};

/// PostgreSQL implementation of ProfileRepository.
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: Pool<Postgres>,
}

impl PgProfileRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn ensure_exists(&self, user_id: Uuid) -> Result<()> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO user_profiles (id, onboarding_completed, created_at, updated_at)
             VALUES ($1, FALSE, $2, $2)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(user_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }

    async fn get(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        sqlx::query_as::<_, UserProfile>(
            "SELECT id, onboarding_completed, created_at, updated_at
             FROM user_profiles WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)
    }

    async fn complete_onboarding(&self, user_id: Uuid) -> Result<()> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO user_profiles (id, onboarding_completed, created_at, updated_at)
             VALUES ($1, TRUE, $2, $2)
             ON CONFLICT (id) DO UPDATE SET onboarding_completed = TRUE, updated_at = $2",
        )
        .bind(user_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }
}
