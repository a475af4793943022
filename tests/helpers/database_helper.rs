//! Test database helper utilities
//!
//! Database-backed suites run against the database named by
//! `TEST_DATABASE_URL` and skip cleanly when it is not set, so the default
//! `cargo test` run needs no infrastructure.

use sqlx::PgPool;

use FlockKeeper::models::church::{Church, CreateChurchRequest};
use FlockKeeper::models::leader::{CreateLeaderRequest, Leader, LeaderRole};
use FlockKeeper::services::ServiceFactory;

/// Handle to the migrated test database
pub struct TestDatabase {
    pub pool: PgPool,
}

impl TestDatabase {
    /// Connect to the test database, or return None when the suite should be
    /// skipped
    pub async fn connect() -> Option<Self> {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("TEST_DATABASE_URL not set, skipping database test");
            return None;
        };

        let pool = PgPool::connect(&url).await.expect("test database connection");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("test database migrations");

        let db = Self { pool };
        db.truncate_all().await;
        Some(db)
    }

    /// Reset every table between tests
    pub async fn truncate_all(&self) {
        sqlx::query(
            "TRUNCATE announcements, checkins, prayer_requests, guests, members, new_members, converts, leaders, churches RESTART IDENTITY CASCADE",
        )
        .execute(&self.pool)
        .await
        .expect("truncate test tables");
    }

    /// Seed a church with one admin leader and return both
    pub async fn seed_church(&self, services: &ServiceFactory) -> (Church, Leader) {
        let church = services
            .db
            .churches
            .create(CreateChurchRequest {
                name: "Grace Chapel".to_string(),
                language_code: Some("en".to_string()),
                timezone: Some("America/Chicago".to_string()),
            })
            .await
            .expect("seed church");

        let leader = services
            .db
            .leaders
            .create(CreateLeaderRequest {
                church_id: church.id,
                name: "Pat Okafor".to_string(),
                email: "pat@gracechapel.org".to_string(),
                access_code: "open-sesame".to_string(),
                role: LeaderRole::Admin,
            })
            .await
            .expect("seed leader");

        (church, leader)
    }
}
