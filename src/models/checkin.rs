//! Checkin (follow-up record) model
//!
//! A checkin is a logged interaction with a convert or new member: its
//! outcome, an optional note, and optionally the next scheduled visit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Which follow-up track a person belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "person_kind", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonKind {
    Convert,
    NewMember,
}

impl PersonKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonKind::Convert => "convert",
            PersonKind::NewMember => "new_member",
        }
    }
}

/// Outcome of a follow-up interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "checkin_outcome", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckinOutcome {
    Connected,
    LeftMessage,
    NoResponse,
    WrongNumber,
    /// A future visit was scheduled without a live conversation, e.g. by the
    /// mass follow-up screen.
    Scheduled,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Checkin {
    pub id: i64,
    pub church_id: i64,
    pub person_kind: PersonKind,
    pub person_id: i64,
    pub outcome: CheckinOutcome,
    pub completed_visit: bool,
    pub note: Option<String>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub meeting_link: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckinRequest {
    pub person_kind: PersonKind,
    pub person_id: i64,
    pub outcome: CheckinOutcome,
    #[serde(default)]
    pub completed_visit: bool,
    pub note: Option<String>,
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default)]
    pub create_meeting_link: bool,
}

/// Reference to one person in a mass follow-up batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PersonRef {
    pub kind: PersonKind,
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MassFollowUpCandidatesRequest {
    pub track: PersonKind,
    pub stage: Option<crate::pipeline::FollowUpStage>,
    /// Only include people whose latest checkin is older than this
    pub not_contacted_since: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MassFollowUpCandidate {
    pub kind: PersonKind,
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub stage: crate::pipeline::FollowUpStage,
    pub last_checkin_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MassFollowUpScheduleRequest {
    pub people: Vec<PersonRef>,
    pub scheduled_for: DateTime<Utc>,
    pub note: Option<String>,
    #[serde(default)]
    pub create_meeting_links: bool,
    /// Send each person a localized reminder through their preferred channel
    #[serde(default)]
    pub notify: bool,
}

/// Per-person failure inside a mass follow-up batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MassFollowUpFailure {
    pub kind: PersonKind,
    pub id: i64,
    pub reason: String,
}

/// Result of a mass follow-up batch: which people were scheduled and which
/// failed, without aborting the batch on individual failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MassFollowUpReport {
    pub total: usize,
    pub scheduled: Vec<PersonRef>,
    pub failures: Vec<MassFollowUpFailure>,
}
