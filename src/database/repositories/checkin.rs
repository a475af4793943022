//! Checkin repository implementation
//!
//! Stores follow-up interaction records and answers the candidate queries
//! behind the mass follow-up screen.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::checkin::{Checkin, CheckinOutcome, MassFollowUpCandidate, PersonKind};
use crate::pipeline::FollowUpStage;
use crate::utils::errors::FlockKeeperError;

const CHECKIN_COLUMNS: &str = "id, church_id, person_kind, person_id, outcome, completed_visit, note, scheduled_for, meeting_link, created_by, created_at";

#[derive(Debug, Clone)]
pub struct CheckinRepository {
    pool: PgPool,
}

impl CheckinRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a follow-up interaction
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        church_id: i64,
        person_kind: PersonKind,
        person_id: i64,
        outcome: CheckinOutcome,
        completed_visit: bool,
        note: Option<&str>,
        scheduled_for: Option<DateTime<Utc>>,
        meeting_link: Option<&str>,
        created_by: i64,
    ) -> Result<Checkin, FlockKeeperError> {
        let checkin = sqlx::query_as::<_, Checkin>(&format!(
            r#"
            INSERT INTO checkins (church_id, person_kind, person_id, outcome, completed_visit, note, scheduled_for, meeting_link, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {CHECKIN_COLUMNS}
            "#
        ))
        .bind(church_id)
        .bind(person_kind)
        .bind(person_id)
        .bind(outcome)
        .bind(completed_visit)
        .bind(note)
        .bind(scheduled_for)
        .bind(meeting_link)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(checkin)
    }

    /// Follow-up history for one person, newest first
    pub async fn list_for_person(
        &self,
        church_id: i64,
        person_kind: PersonKind,
        person_id: i64,
    ) -> Result<Vec<Checkin>, FlockKeeperError> {
        let checkins = sqlx::query_as::<_, Checkin>(&format!(
            r#"
            SELECT {CHECKIN_COLUMNS} FROM checkins
            WHERE church_id = $1 AND person_kind = $2 AND person_id = $3
            ORDER BY created_at DESC
            "#
        ))
        .bind(church_id)
        .bind(person_kind)
        .bind(person_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(checkins)
    }

    /// Candidate recipients for a mass follow-up batch.
    ///
    /// Joins each person in the track against their latest checkin so the
    /// caller can filter out people contacted recently. People already at the
    /// terminal stage are excluded.
    pub async fn mass_candidates(
        &self,
        church_id: i64,
        track: PersonKind,
        stage: Option<FollowUpStage>,
        not_contacted_since: Option<DateTime<Utc>>,
    ) -> Result<Vec<MassFollowUpCandidate>, FlockKeeperError> {
        let table = match track {
            PersonKind::Convert => "converts",
            PersonKind::NewMember => "new_members",
        };

        let candidates = sqlx::query_as::<_, MassFollowUpCandidate>(&format!(
            r#"
            SELECT $2::person_kind AS kind,
                   p.id,
                   p.first_name,
                   p.last_name,
                   p.email,
                   p.phone,
                   p.stage,
                   latest.created_at AS last_checkin_at
            FROM {table} p
            LEFT JOIN LATERAL (
                SELECT c.created_at FROM checkins c
                WHERE c.church_id = p.church_id
                  AND c.person_kind = $2
                  AND c.person_id = p.id
                ORDER BY c.created_at DESC
                LIMIT 1
            ) latest ON true
            WHERE p.church_id = $1
              AND p.stage <> 'final_completed'
              AND ($3::follow_up_stage IS NULL OR p.stage = $3)
              AND ($4::timestamptz IS NULL OR latest.created_at IS NULL OR latest.created_at < $4)
            ORDER BY latest.created_at ASC NULLS FIRST, p.id ASC
            "#
        ))
        .bind(church_id)
        .bind(track)
        .bind(stage)
        .bind(not_contacted_since)
        .fetch_all(&self.pool)
        .await?;

        Ok(candidates)
    }

    /// Count checkins of a church
    pub async fn count(&self, church_id: i64) -> Result<i64, FlockKeeperError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM checkins WHERE church_id = $1")
            .bind(church_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
