//! Leader model
//!
//! Leaders are the authenticated principals of the API: ministry staff who
//! log follow-ups and administer records for their church.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role assigned to a leader account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "leader_role", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaderRole {
    Admin,
    Leader,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Leader {
    pub id: i64,
    pub church_id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub access_code: String,
    pub role: LeaderRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeaderRequest {
    pub church_id: i64,
    pub name: String,
    pub email: String,
    pub access_code: String,
    pub role: LeaderRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub access_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub leader_id: i64,
    pub church_id: i64,
    pub role: LeaderRole,
}
