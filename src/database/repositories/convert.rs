//! Convert repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::convert::{Convert, CreateConvertRequest, UpdateConvertRequest};
use crate::pipeline::FollowUpStage;
use crate::utils::errors::FlockKeeperError;

const CONVERT_COLUMNS: &str = "id, church_id, first_name, last_name, email, phone, decision_date, stage, assigned_leader_id, notes, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct ConvertRepository {
    pool: PgPool,
}

impl ConvertRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new convert, entering the pipeline at NEW
    pub async fn create(
        &self,
        church_id: i64,
        request: CreateConvertRequest,
    ) -> Result<Convert, FlockKeeperError> {
        let convert = sqlx::query_as::<_, Convert>(&format!(
            r#"
            INSERT INTO converts (church_id, first_name, last_name, email, phone, decision_date, stage, assigned_leader_id, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING {CONVERT_COLUMNS}
            "#
        ))
        .bind(church_id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.decision_date)
        .bind(FollowUpStage::New)
        .bind(request.assigned_leader_id)
        .bind(&request.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(convert)
    }

    /// Find convert by ID within a church
    pub async fn find_by_id(
        &self,
        church_id: i64,
        id: i64,
    ) -> Result<Option<Convert>, FlockKeeperError> {
        let convert = sqlx::query_as::<_, Convert>(&format!(
            "SELECT {CONVERT_COLUMNS} FROM converts WHERE church_id = $1 AND id = $2"
        ))
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(convert)
    }

    /// Update convert fields, leaving unset fields untouched
    pub async fn update(
        &self,
        church_id: i64,
        id: i64,
        request: UpdateConvertRequest,
    ) -> Result<Convert, FlockKeeperError> {
        let convert = sqlx::query_as::<_, Convert>(&format!(
            r#"
            UPDATE converts
            SET first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                decision_date = COALESCE($7, decision_date),
                stage = COALESCE($8, stage),
                assigned_leader_id = COALESCE($9, assigned_leader_id),
                notes = COALESCE($10, notes),
                updated_at = $11
            WHERE church_id = $1 AND id = $2
            RETURNING {CONVERT_COLUMNS}
            "#
        ))
        .bind(church_id)
        .bind(id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.decision_date)
        .bind(request.stage)
        .bind(request.assigned_leader_id)
        .bind(&request.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(convert)
    }

    /// Move a convert to a new pipeline stage
    pub async fn set_stage(
        &self,
        church_id: i64,
        id: i64,
        stage: FollowUpStage,
    ) -> Result<Convert, FlockKeeperError> {
        let convert = sqlx::query_as::<_, Convert>(&format!(
            r#"
            UPDATE converts
            SET stage = $3, updated_at = $4
            WHERE church_id = $1 AND id = $2
            RETURNING {CONVERT_COLUMNS}
            "#
        ))
        .bind(church_id)
        .bind(id)
        .bind(stage)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(convert)
    }

    /// Delete convert
    pub async fn delete(&self, church_id: i64, id: i64) -> Result<bool, FlockKeeperError> {
        let result = sqlx::query("DELETE FROM converts WHERE church_id = $1 AND id = $2")
            .bind(church_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List converts with optional name search and stage filter
    pub async fn list(
        &self,
        church_id: i64,
        search: Option<&str>,
        stage: Option<FollowUpStage>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Convert>, FlockKeeperError> {
        let pattern = search.map(|s| format!("%{}%", s));
        let converts = sqlx::query_as::<_, Convert>(&format!(
            r#"
            SELECT {CONVERT_COLUMNS} FROM converts
            WHERE church_id = $1
              AND ($2::text IS NULL OR first_name ILIKE $2 OR last_name ILIKE $2)
              AND ($3::follow_up_stage IS NULL OR stage = $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(church_id)
        .bind(pattern)
        .bind(stage)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(converts)
    }

    /// List converts assigned to a leader
    pub async fn list_by_leader(
        &self,
        church_id: i64,
        leader_id: i64,
    ) -> Result<Vec<Convert>, FlockKeeperError> {
        let converts = sqlx::query_as::<_, Convert>(&format!(
            "SELECT {CONVERT_COLUMNS} FROM converts WHERE church_id = $1 AND assigned_leader_id = $2 ORDER BY created_at DESC"
        ))
        .bind(church_id)
        .bind(leader_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(converts)
    }

    /// List all converts of a church (exports)
    pub async fn list_all(&self, church_id: i64) -> Result<Vec<Convert>, FlockKeeperError> {
        let converts = sqlx::query_as::<_, Convert>(&format!(
            "SELECT {CONVERT_COLUMNS} FROM converts WHERE church_id = $1 ORDER BY created_at DESC"
        ))
        .bind(church_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(converts)
    }

    /// Count converts of a church
    pub async fn count(&self, church_id: i64) -> Result<i64, FlockKeeperError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM converts WHERE church_id = $1")
            .bind(church_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
