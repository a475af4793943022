//! New member repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::new_member::{CreateNewMemberRequest, NewMember, UpdateNewMemberRequest};
use crate::pipeline::FollowUpStage;
use crate::utils::errors::FlockKeeperError;

const NEW_MEMBER_COLUMNS: &str = "id, church_id, first_name, last_name, email, phone, joined_date, stage, assigned_leader_id, notes, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct NewMemberRepository {
    pool: PgPool,
}

impl NewMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new member record, entering the pipeline at NEW
    pub async fn create(
        &self,
        church_id: i64,
        request: CreateNewMemberRequest,
    ) -> Result<NewMember, FlockKeeperError> {
        let member = sqlx::query_as::<_, NewMember>(&format!(
            r#"
            INSERT INTO new_members (church_id, first_name, last_name, email, phone, joined_date, stage, assigned_leader_id, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING {NEW_MEMBER_COLUMNS}
            "#
        ))
        .bind(church_id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.joined_date)
        .bind(FollowUpStage::New)
        .bind(request.assigned_leader_id)
        .bind(&request.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    /// Find new member by ID within a church
    pub async fn find_by_id(
        &self,
        church_id: i64,
        id: i64,
    ) -> Result<Option<NewMember>, FlockKeeperError> {
        let member = sqlx::query_as::<_, NewMember>(&format!(
            "SELECT {NEW_MEMBER_COLUMNS} FROM new_members WHERE church_id = $1 AND id = $2"
        ))
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    /// Update new member fields, leaving unset fields untouched
    pub async fn update(
        &self,
        church_id: i64,
        id: i64,
        request: UpdateNewMemberRequest,
    ) -> Result<NewMember, FlockKeeperError> {
        let member = sqlx::query_as::<_, NewMember>(&format!(
            r#"
            UPDATE new_members
            SET first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                joined_date = COALESCE($7, joined_date),
                stage = COALESCE($8, stage),
                assigned_leader_id = COALESCE($9, assigned_leader_id),
                notes = COALESCE($10, notes),
                updated_at = $11
            WHERE church_id = $1 AND id = $2
            RETURNING {NEW_MEMBER_COLUMNS}
            "#
        ))
        .bind(church_id)
        .bind(id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.joined_date)
        .bind(request.stage)
        .bind(request.assigned_leader_id)
        .bind(&request.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    /// Move a new member to a new pipeline stage
    pub async fn set_stage(
        &self,
        church_id: i64,
        id: i64,
        stage: FollowUpStage,
    ) -> Result<NewMember, FlockKeeperError> {
        let member = sqlx::query_as::<_, NewMember>(&format!(
            r#"
            UPDATE new_members
            SET stage = $3, updated_at = $4
            WHERE church_id = $1 AND id = $2
            RETURNING {NEW_MEMBER_COLUMNS}
            "#
        ))
        .bind(church_id)
        .bind(id)
        .bind(stage)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    /// Delete new member
    pub async fn delete(&self, church_id: i64, id: i64) -> Result<bool, FlockKeeperError> {
        let result = sqlx::query("DELETE FROM new_members WHERE church_id = $1 AND id = $2")
            .bind(church_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List new members with optional name search and stage filter
    pub async fn list(
        &self,
        church_id: i64,
        search: Option<&str>,
        stage: Option<FollowUpStage>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NewMember>, FlockKeeperError> {
        let pattern = search.map(|s| format!("%{}%", s));
        let members = sqlx::query_as::<_, NewMember>(&format!(
            r#"
            SELECT {NEW_MEMBER_COLUMNS} FROM new_members
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

        Ok(members)
    }

    /// List new members assigned to a leader
    pub async fn list_by_leader(
        &self,
        church_id: i64,
        leader_id: i64,
    ) -> Result<Vec<NewMember>, FlockKeeperError> {
        let members = sqlx::query_as::<_, NewMember>(&format!(
            "SELECT {NEW_MEMBER_COLUMNS} FROM new_members WHERE church_id = $1 AND assigned_leader_id = $2 ORDER BY created_at DESC"
        ))
        .bind(church_id)
        .bind(leader_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// List all new members of a church (exports)
    pub async fn list_all(&self, church_id: i64) -> Result<Vec<NewMember>, FlockKeeperError> {
        let members = sqlx::query_as::<_, NewMember>(&format!(
            "SELECT {NEW_MEMBER_COLUMNS} FROM new_members WHERE church_id = $1 ORDER BY created_at DESC"
        ))
        .bind(church_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Count new members of a church
    pub async fn count(&self, church_id: i64) -> Result<i64, FlockKeeperError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM new_members WHERE church_id = $1")
            .bind(church_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
