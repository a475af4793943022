//! New member model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pipeline::FollowUpStage;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NewMember {
    pub id: i64,
    pub church_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub joined_date: NaiveDate,
    pub stage: FollowUpStage,
    pub assigned_leader_id: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNewMemberRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub joined_date: NaiveDate,
    pub assigned_leader_id: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNewMemberRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub joined_date: Option<NaiveDate>,
    pub stage: Option<FollowUpStage>,
    pub assigned_leader_id: Option<i64>,
    pub notes: Option<String>,
}
