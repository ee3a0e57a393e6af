//! PostgreSQL implementation of ProfileRepository
//!
//! Expects the `profiles` table managed by the hosted backend, with a
//! pgvector `embedding` column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pgvector::Vector;
use sqlx::PgPool;
use uuid::Uuid;

use stuntpitch::{DomainError, Profile, ProfileRepository};

const SELECT_PROFILE: &str = r#"
    SELECT id, bio, skills, experience, embedding, embedding_updated_at
    FROM profiles
"#;

// Same notion of "has text" as Profile::has_text
const HAS_TEXT: &str = r#"
    (btrim(coalesce(bio, '')) <> ''
     OR btrim(coalesce(experience, '')) <> ''
     OR EXISTS (SELECT 1 FROM unnest(skills) AS skill WHERE btrim(skill) <> ''))
"#;

/// PostgreSQL implementation of ProfileRepository
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    bio: Option<String>,
    skills: Option<Vec<String>>,
    experience: Option<String>,
    embedding: Option<Vector>,
    embedding_updated_at: Option<DateTime<Utc>>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            biography: row.bio,
            skills: row.skills.unwrap_or_default(),
            experience: row.experience,
            embedding: row.embedding.map(|v| v.to_vec()),
            embedding_updated_at: row.embedding_updated_at,
        }
    }
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn missing_embedding_query() -> String {
    format!(
        "{} WHERE embedding IS NULL AND {} ORDER BY id LIMIT $1",
        SELECT_PROFILE, HAS_TEXT
    )
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!("{} WHERE id = $1", SELECT_PROFILE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;

        Ok(row.map(Profile::from))
    }

    async fn find_missing_embedding(&self, limit: usize) -> Result<Vec<Profile>, DomainError> {
        let rows = sqlx::query_as::<_, ProfileRow>(&missing_embedding_query())
            .bind(sql_limit(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn find_all(&self, limit: usize) -> Result<Vec<Profile>, DomainError> {
        let rows = sqlx::query_as::<_, ProfileRow>(&format!(
            "{} ORDER BY id LIMIT $1",
            SELECT_PROFILE
        ))
        .bind(sql_limit(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn update_embedding(
        &self,
        id: Uuid,
        embedding: &[f32],
        updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET embedding = $2, embedding_updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(Vector::from(embedding.to_vec()))
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
