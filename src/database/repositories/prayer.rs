//! Prayer request repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::prayer::{CreatePrayerRequest, PrayerRequest, UpdatePrayerRequest};
use crate::utils::errors::FlockKeeperError;

const PRAYER_COLUMNS: &str =
    "id, church_id, requester_name, contact, request, answered, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PrayerRepository {
    pool: PgPool,
}

impl PrayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        church_id: i64,
        request: CreatePrayerRequest,
    ) -> Result<PrayerRequest, FlockKeeperError> {
        let prayer = sqlx::query_as::<_, PrayerRequest>(&format!(
            r#"
            INSERT INTO prayer_requests (church_id, requester_name, contact, request, answered, created_at, updated_at)
            VALUES ($1, $2, $3, $4, false, $5, $5)
            RETURNING {PRAYER_COLUMNS}
            "#
        ))
        .bind(church_id)
        .bind(&request.requester_name)
        .bind(&request.contact)
        .bind(&request.request)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(prayer)
    }

    pub async fn find_by_id(
        &self,
        church_id: i64,
        id: i64,
    ) -> Result<Option<PrayerRequest>, FlockKeeperError> {
        let prayer = sqlx::query_as::<_, PrayerRequest>(&format!(
            "SELECT {PRAYER_COLUMNS} FROM prayer_requests WHERE church_id = $1 AND id = $2"
        ))
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prayer)
    }

    pub async fn update(
        &self,
        church_id: i64,
        id: i64,
        request: UpdatePrayerRequest,
    ) -> Result<PrayerRequest, FlockKeeperError> {
        let prayer = sqlx::query_as::<_, PrayerRequest>(&format!(
            r#"
            UPDATE prayer_requests
            SET requester_name = COALESCE($3, requester_name),
                contact = COALESCE($4, contact),
                request = COALESCE($5, request),
                answered = COALESCE($6, answered),
                updated_at = $7
            WHERE church_id = $1 AND id = $2
            RETURNING {PRAYER_COLUMNS}
            "#
        ))
        .bind(church_id)
        .bind(id)
        .bind(&request.requester_name)
        .bind(&request.contact)
        .bind(&request.request)
        .bind(request.answered)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(prayer)
    }

    /// Mark a prayer request answered
    pub async fn mark_answered(
        &self,
        church_id: i64,
        id: i64,
    ) -> Result<PrayerRequest, FlockKeeperError> {
        let prayer = sqlx::query_as::<_, PrayerRequest>(&format!(
            r#"
            UPDATE prayer_requests
            SET answered = true, updated_at = $3
            WHERE church_id = $1 AND id = $2
            RETURNING {PRAYER_COLUMNS}
            "#
        ))
        .bind(church_id)
        .bind(id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(prayer)
    }

    pub async fn delete(&self, church_id: i64, id: i64) -> Result<bool, FlockKeeperError> {
        let result = sqlx::query("DELETE FROM prayer_requests WHERE church_id = $1 AND id = $2")
            .bind(church_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List prayer requests, optionally filtered by answered state
    pub async fn list(
        &self,
        church_id: i64,
        answered: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PrayerRequest>, FlockKeeperError> {
        let prayers = sqlx::query_as::<_, PrayerRequest>(&format!(
            r#"
            SELECT {PRAYER_COLUMNS} FROM prayer_requests
            WHERE church_id = $1
              AND ($2::boolean IS NULL OR answered = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(church_id)
        .bind(answered)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(prayers)
    }

    pub async fn count(&self, church_id: i64) -> Result<i64, FlockKeeperError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM prayer_requests WHERE church_id = $1")
                .bind(church_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }
}
