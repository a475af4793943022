//! Router and middleware tests
//!
//! These run the axum router directly with `tower::ServiceExt::oneshot`, no
//! database required: they stop at the authentication/authorization layers or
//! hit handlers that never touch storage.

mod helpers;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use tower::ServiceExt;

use helpers::{lazy_pool, test_settings, test_state};
use FlockKeeper::build_router;
use FlockKeeper::database::LeaderRepository;
use FlockKeeper::models::leader::{Leader, LeaderRole};
use FlockKeeper::services::AuthService;

fn token_for(role: LeaderRole) -> String {
    let settings = test_settings();
    let auth = AuthService::new(LeaderRepository::new(lazy_pool()), settings);
    let leader = Leader {
        id: 42,
        church_id: 7,
        name: "Pat Okafor".to_string(),
        email: "pat@gracechapel.org".to_string(),
        access_code: "open-sesame".to_string(),
        role,
        active: true,
        created_at: Utc::now(),
    };
    auth.issue_token(&leader).unwrap()
}

fn router() -> axum::Router {
    build_router(test_state(lazy_pool(), test_settings()))
}

#[tokio::test]
async fn test_api_requires_bearer_token() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/pipeline/CONVERT")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/pipeline/CONVERT")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_pipeline_table_for_each_track() {
    let token = token_for(LeaderRole::Leader);

    for (track, contact_stage) in [("CONVERT", "CONTACTED"), ("NEW_MEMBER", "CONTACT_NEW_MEMBER")] {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/pipeline/{}", track))
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let table: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let stages: Vec<&str> = table
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["stage"].as_str().unwrap())
            .collect();

        assert_eq!(stages.first(), Some(&"NEW"));
        assert_eq!(stages.last(), Some(&"FINAL_COMPLETED"));
        assert!(stages.contains(&contact_stage));

        // Every row carries a label and a badge color
        for row in table.as_array().unwrap() {
            assert!(row["label"].as_str().is_some());
            assert!(row["color"].as_str().is_some());
        }
    }
}

#[tokio::test]
async fn test_admin_routes_reject_leaders() {
    let token = token_for(LeaderRole::Leader);

    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/admin/converts")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_error_body_shape() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/checkins/CONVERT/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap().contains("bearer token"));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let token = token_for(LeaderRole::Leader);

    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/pipeline/CONVERT")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
