//! Church repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::church::{Church, CreateChurchRequest};
use crate::utils::errors::FlockKeeperError;
use crate::utils::helpers::slugify;

#[derive(Debug, Clone)]
pub struct ChurchRepository {
    pool: PgPool,
}

impl ChurchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new church
    pub async fn create(&self, request: CreateChurchRequest) -> Result<Church, FlockKeeperError> {
        let church = sqlx::query_as::<_, Church>(
            r#"
            INSERT INTO churches (name, slug, language_code, timezone, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, slug, language_code, timezone, created_at
            "#,
        )
        .bind(&request.name)
        .bind(slugify(&request.name))
        .bind(request.language_code.unwrap_or_else(|| "en".to_string()))
        .bind(request.timezone.unwrap_or_else(|| "UTC".to_string()))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(church)
    }

    /// Find church by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Church>, FlockKeeperError> {
        let church = sqlx::query_as::<_, Church>(
            "SELECT id, name, slug, language_code, timezone, created_at FROM churches WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(church)
    }

    /// List all churches
    pub async fn list(&self) -> Result<Vec<Church>, FlockKeeperError> {
        let churches = sqlx::query_as::<_, Church>(
            "SELECT id, name, slug, language_code, timezone, created_at FROM churches ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(churches)
    }
}
