//! Announcement model
//!
//! An announcement is an outbound communication (email/SMS/MMS) sent or
//! scheduled to one or more recipient groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Delivery channel for an announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "announcement_channel", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnouncementChannel {
    Email,
    Sms,
    Mms,
}

/// Lifecycle status of an announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "announcement_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnouncementStatus {
    Draft,
    Scheduled,
    Sent,
    Failed,
}

/// Recipient group an announcement is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecipientGroup {
    Converts,
    NewMembers,
    Members,
    Guests,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Announcement {
    pub id: i64,
    pub church_id: i64,
    pub subject: String,
    pub body: String,
    pub channel: AnnouncementChannel,
    pub media_url: Option<String>,
    pub audiences: Json<Vec<RecipientGroup>>,
    pub status: AnnouncementStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub sent_count: i32,
    pub failed_count: i32,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub subject: String,
    pub body: String,
    pub channel: AnnouncementChannel,
    pub media_url: Option<String>,
    pub audiences: Vec<RecipientGroup>,
}

/// Request for `POST /api/announcements/send`: either an existing draft by id
/// or an inline announcement to create and send in one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendAnnouncementRequest {
    pub announcement_id: Option<i64>,
    pub draft: Option<CreateAnnouncementRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleAnnouncementRequest {
    pub announcement_id: Option<i64>,
    pub draft: Option<CreateAnnouncementRequest>,
    pub scheduled_at: DateTime<Utc>,
}

/// Dispatch summary returned by send/schedule operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchReport {
    pub announcement_id: i64,
    pub status: AnnouncementStatus,
    pub sent: u32,
    pub failed: u32,
}

/// A resolved recipient for one announcement delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub group: RecipientGroup,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}
