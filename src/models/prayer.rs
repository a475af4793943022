//! Prayer request model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PrayerRequest {
    pub id: i64,
    pub church_id: i64,
    pub requester_name: String,
    pub contact: Option<String>,
    pub request: String,
    pub answered: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrayerRequest {
    pub requester_name: String,
    pub contact: Option<String>,
    pub request: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePrayerRequest {
    pub requester_name: Option<String>,
    pub contact: Option<String>,
    pub request: Option<String>,
    pub answered: Option<bool>,
}
