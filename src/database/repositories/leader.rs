//! Leader repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::leader::{CreateLeaderRequest, Leader};
use crate::utils::errors::FlockKeeperError;

#[derive(Debug, Clone)]
pub struct LeaderRepository {
    pool: PgPool,
}

impl LeaderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new leader account
    pub async fn create(&self, request: CreateLeaderRequest) -> Result<Leader, FlockKeeperError> {
        let leader = sqlx::query_as::<_, Leader>(
            r#"
            INSERT INTO leaders (church_id, name, email, access_code, role, active, created_at)
            VALUES ($1, $2, $3, $4, $5, true, $6)
            RETURNING id, church_id, name, email, access_code, role, active, created_at
            "#,
        )
        .bind(request.church_id)
        .bind(&request.name)
        .bind(request.email.to_lowercase())
        .bind(&request.access_code)
        .bind(request.role)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(leader)
    }

    /// Find leader by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Leader>, FlockKeeperError> {
        let leader = sqlx::query_as::<_, Leader>(
            "SELECT id, church_id, name, email, access_code, role, active, created_at FROM leaders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(leader)
    }

    /// Find leader by login email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Leader>, FlockKeeperError> {
        let leader = sqlx::query_as::<_, Leader>(
            "SELECT id, church_id, name, email, access_code, role, active, created_at FROM leaders WHERE email = $1",
        )
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(leader)
    }

    /// List leaders of a church
    pub async fn list_by_church(&self, church_id: i64) -> Result<Vec<Leader>, FlockKeeperError> {
        let leaders = sqlx::query_as::<_, Leader>(
            "SELECT id, church_id, name, email, access_code, role, active, created_at FROM leaders WHERE church_id = $1 ORDER BY name ASC",
        )
        .bind(church_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(leaders)
    }

    /// Deactivate a leader account
    pub async fn set_active(&self, id: i64, active: bool) -> Result<Leader, FlockKeeperError> {
        let leader = sqlx::query_as::<_, Leader>(
            r#"
            UPDATE leaders
            SET active = $2
            WHERE id = $1
            RETURNING id, church_id, name, email, access_code, role, active, created_at
            "#,
        )
        .bind(id)
        .bind(active)
        .fetch_one(&self.pool)
        .await?;

        Ok(leader)
    }
}
