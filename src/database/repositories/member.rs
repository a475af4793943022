//! Member repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::member::{CreateMemberRequest, Member, UpdateMemberRequest};
use crate::utils::errors::FlockKeeperError;

const MEMBER_COLUMNS: &str =
    "id, church_id, first_name, last_name, email, phone, membership_date, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        church_id: i64,
        request: CreateMemberRequest,
    ) -> Result<Member, FlockKeeperError> {
        let member = sqlx::query_as::<_, Member>(&format!(
            r#"
            INSERT INTO members (church_id, first_name, last_name, email, phone, membership_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING {MEMBER_COLUMNS}
            "#
        ))
        .bind(church_id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.membership_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    pub async fn find_by_id(
        &self,
        church_id: i64,
        id: i64,
    ) -> Result<Option<Member>, FlockKeeperError> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE church_id = $1 AND id = $2"
        ))
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    pub async fn update(
        &self,
        church_id: i64,
        id: i64,
        request: UpdateMemberRequest,
    ) -> Result<Member, FlockKeeperError> {
        let member = sqlx::query_as::<_, Member>(&format!(
            r#"
            UPDATE members
            SET first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                membership_date = COALESCE($7, membership_date),
                updated_at = $8
            WHERE church_id = $1 AND id = $2
            RETURNING {MEMBER_COLUMNS}
            "#
        ))
        .bind(church_id)
        .bind(id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.membership_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    pub async fn delete(&self, church_id: i64, id: i64) -> Result<bool, FlockKeeperError> {
        let result = sqlx::query("DELETE FROM members WHERE church_id = $1 AND id = $2")
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
    ) -> Result<Vec<Member>, FlockKeeperError> {
        let pattern = search.map(|s| format!("%{}%", s));
        let members = sqlx::query_as::<_, Member>(&format!(
            r#"
            SELECT {MEMBER_COLUMNS} FROM members
            WHERE church_id = $1
              AND ($2::text IS NULL OR first_name ILIKE $2 OR last_name ILIKE $2)
            ORDER BY last_name ASC, first_name ASC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(church_id)
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// List all members of a church (exports)
    pub async fn list_all(&self, church_id: i64) -> Result<Vec<Member>, FlockKeeperError> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE church_id = $1 ORDER BY last_name ASC"
        ))
        .bind(church_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    pub async fn count(&self, church_id: i64) -> Result<i64, FlockKeeperError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM members WHERE church_id = $1")
            .bind(church_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
