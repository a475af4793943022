//! Announcement repository implementation

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::announcement::{
    Announcement, AnnouncementStatus, CreateAnnouncementRequest, RecipientGroup,
};
use crate::utils::errors::FlockKeeperError;

const ANNOUNCEMENT_COLUMNS: &str = "id, church_id, subject, body, channel, media_url, audiences, status, scheduled_at, sent_at, sent_count, failed_count, created_by, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct AnnouncementRepository {
    pool: PgPool,
}

impl AnnouncementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an announcement draft
    pub async fn create(
        &self,
        church_id: i64,
        request: CreateAnnouncementRequest,
        created_by: i64,
    ) -> Result<Announcement, FlockKeeperError> {
        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            r#"
            INSERT INTO announcements (church_id, subject, body, channel, media_url, audiences, status, sent_count, failed_count, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 0, 0, $8, $9, $9)
            RETURNING {ANNOUNCEMENT_COLUMNS}
            "#
        ))
        .bind(church_id)
        .bind(&request.subject)
        .bind(&request.body)
        .bind(request.channel)
        .bind(&request.media_url)
        .bind(Json(request.audiences.clone()))
        .bind(AnnouncementStatus::Draft)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(announcement)
    }

    /// Find announcement by ID within a church
    pub async fn find_by_id(
        &self,
        church_id: i64,
        id: i64,
    ) -> Result<Option<Announcement>, FlockKeeperError> {
        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE church_id = $1 AND id = $2"
        ))
        .bind(church_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(announcement)
    }

    /// List announcements of a church, newest first
    pub async fn list(
        &self,
        church_id: i64,
        status: Option<AnnouncementStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Announcement>, FlockKeeperError> {
        let announcements = sqlx::query_as::<_, Announcement>(&format!(
            r#"
            SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements
            WHERE church_id = $1
              AND ($2::announcement_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(church_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(announcements)
    }

    /// Mark an announcement scheduled for future dispatch
    pub async fn schedule(
        &self,
        church_id: i64,
        id: i64,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Announcement, FlockKeeperError> {
        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            r#"
            UPDATE announcements
            SET status = $3, scheduled_at = $4, updated_at = $5
            WHERE church_id = $1 AND id = $2
            RETURNING {ANNOUNCEMENT_COLUMNS}
            "#
        ))
        .bind(church_id)
        .bind(id)
        .bind(AnnouncementStatus::Scheduled)
        .bind(scheduled_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(announcement)
    }

    /// Record the result of a dispatch attempt
    pub async fn record_dispatch(
        &self,
        id: i64,
        status: AnnouncementStatus,
        sent_count: i32,
        failed_count: i32,
    ) -> Result<Announcement, FlockKeeperError> {
        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            r#"
            UPDATE announcements
            SET status = $2, sent_count = $3, failed_count = $4, sent_at = $5, updated_at = $5
            WHERE id = $1
            RETURNING {ANNOUNCEMENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(sent_count)
        .bind(failed_count)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(announcement)
    }

    /// Scheduled announcements whose dispatch time has arrived, across all
    /// churches. Used by the background dispatch loop.
    pub async fn due_scheduled(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Announcement>, FlockKeeperError> {
        let announcements = sqlx::query_as::<_, Announcement>(&format!(
            r#"
            SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements
            WHERE status = 'scheduled' AND scheduled_at <= $1
            ORDER BY scheduled_at ASC
            "#
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(announcements)
    }

    /// Delete an announcement draft
    pub async fn delete(&self, church_id: i64, id: i64) -> Result<bool, FlockKeeperError> {
        let result = sqlx::query("DELETE FROM announcements WHERE church_id = $1 AND id = $2")
            .bind(church_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Names and addresses for one recipient group of a church.
    ///
    /// Returns (name, email, phone) rows; the announcement service filters
    /// them by the channel's address requirement.
    pub async fn recipients_for_group(
        &self,
        church_id: i64,
        group: RecipientGroup,
    ) -> Result<Vec<(String, Option<String>, Option<String>)>, FlockKeeperError> {
        let table = match group {
            RecipientGroup::Converts => "converts",
            RecipientGroup::NewMembers => "new_members",
            RecipientGroup::Members => "members",
            RecipientGroup::Guests => "guests",
        };

        let rows: Vec<(String, Option<String>, Option<String>)> = sqlx::query_as(&format!(
            "SELECT first_name || ' ' || last_name, email, phone FROM {table} WHERE church_id = $1"
        ))
        .bind(church_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Count announcements of a church
    pub async fn count(&self, church_id: i64) -> Result<i64, FlockKeeperError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM announcements WHERE church_id = $1")
                .bind(church_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }
}
