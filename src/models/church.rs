//! Church (tenant) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Church {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub language_code: String,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChurchRequest {
    pub name: String,
    pub language_code: Option<String>,
    pub timezone: Option<String>,
}
