//! Guest repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::guest::{CreateGuestRequest, Guest, UpdateGuestRequest};
use crate::utils::errors::FlockKeeperError;

const GUEST_COLUMNS: &str = "id, church_id, first_name, last_name, email, phone, visit_date, invited_by, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        church_id: i64,
        request: CreateGuestRequest,
    ) -> Result<Guest, FlockKeeperError> {
        let guest = sqlx::query_as::<_, Guest>(&format!(
            r#"
            INSERT INTO guests (church_id, first_name, last_name, email, phone, visit_date, invited_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING {GUEST_COLUMNS}
            "#
        ))
        .bind(church_id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.visit_date)
        .bind(&request.invited_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(guest)
    }

    pub async fn find_by_id(
        &self,
        church_id: i64,
        id: i64,
    ) -> Result<Option<Guest>, FlockKeeperError> {
        let guest = sqlx::query_as::<_, Guest>(&format!(
            "SELECT {GUEST_COLUMNS} FROM guests WHERE church_id = $1 AND id = $2"
        ))
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(guest)
    }

    pub async fn update(
        &self,
        church_id: i64,
        id: i64,
        request: UpdateGuestRequest,
    ) -> Result<Guest, FlockKeeperError> {
        let guest = sqlx::query_as::<_, Guest>(&format!(
            r#"
            UPDATE guests
            SET first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                visit_date = COALESCE($7, visit_date),
                invited_by = COALESCE($8, invited_by),
                updated_at = $9
            WHERE church_id = $1 AND id = $2
            RETURNING {GUEST_COLUMNS}
            "#
        ))
        .bind(church_id)
        .bind(id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.visit_date)
        .bind(&request.invited_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(guest)
    }

    pub async fn delete(&self, church_id: i64, id: i64) -> Result<bool, FlockKeeperError> {
        let result = sqlx::query("DELETE FROM guests WHERE church_id = $1 AND id = $2")
            .bind(church_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list(
        &self,
        church_id: i64,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Guest>, FlockKeeperError> {
        let pattern = search.map(|s| format!("%{}%", s));
        let guests = sqlx::query_as::<_, Guest>(&format!(
            r#"
            SELECT {GUEST_COLUMNS} FROM guests
            WHERE church_id = $1
              AND ($2::text IS NULL OR first_name ILIKE $2 OR last_name ILIKE $2)
            ORDER BY visit_date DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(church_id)
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(guests)
    }

    /// List all guests of a church (exports)
    pub async fn list_all(&self, church_id: i64) -> Result<Vec<Guest>, FlockKeeperError> {
        let guests = sqlx::query_as::<_, Guest>(&format!(
            "SELECT {GUEST_COLUMNS} FROM guests WHERE church_id = $1 ORDER BY visit_date DESC"
        ))
        .bind(church_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(guests)
    }

    pub async fn count(&self, church_id: i64) -> Result<i64, FlockKeeperError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM guests WHERE church_id = $1")
            .bind(church_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
