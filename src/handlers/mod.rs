//! HTTP handlers module
//!
//! This module contains the axum router and one handler module per resource.
//! All routes except `/health` and login require a bearer token; the
//! `/api/admin` subtree additionally requires the admin role.

pub mod announcements;
pub mod auth;
pub mod checkins;
pub mod converts;
pub mod directory;
pub mod exports;
pub mod health;
pub mod mass_followup;
pub mod new_members;
pub mod pipeline;
pub mod prayers;

use std::sync::Arc;

use axum::middleware as axum_middleware;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::config::Settings;
use crate::middleware::{auth as auth_middleware, logging, rate_limit, RateLimitMiddleware};
use crate::services::ServiceFactory;

/// Shared application state injected into handlers and middleware
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ServiceFactory>,
    pub settings: Settings,
    pub rate_limiter: RateLimitMiddleware,
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/converts", get(converts::list).post(converts::create))
        .route(
            "/converts/:id",
            get(converts::get).post(converts::update).delete(converts::remove),
        )
        .route("/new-members", get(new_members::list).post(new_members::create))
        .route(
            "/new-members/:id",
            get(new_members::get).post(new_members::update).delete(new_members::remove),
        )
        .route("/members", get(directory::list_members).post(directory::create_member))
        .route(
            "/members/:id",
            get(directory::get_member)
                .post(directory::update_member)
                .delete(directory::remove_member),
        )
        .route("/guests", get(directory::list_guests).post(directory::create_guest))
        .route(
            "/guests/:id",
            get(directory::get_guest)
                .post(directory::update_guest)
                .delete(directory::remove_guest),
        )
        .route("/prayer-requests", get(prayers::list).post(prayers::create))
        .route(
            "/prayer-requests/:id",
            get(prayers::get).post(prayers::update).delete(prayers::remove),
        )
        .route("/prayer-requests/:id/answered", post(prayers::mark_answered))
        .route("/exports/:entity", get(exports::download))
        .route("/stats", get(health::church_stats))
        .route_layer(axum_middleware::from_fn(auth_middleware::require_admin));

    let api_routes = Router::new()
        .route("/pipeline/:track", get(pipeline::stage_table))
        .route("/checkins", post(checkins::create))
        .route("/checkins/:kind/:id", get(checkins::history))
        .route("/mass-followup/candidates", post(mass_followup::candidates))
        .route("/mass-followup/schedule", post(mass_followup::schedule))
        .route(
            "/announcements",
            get(announcements::list).post(announcements::create),
        )
        .route("/announcements/send", post(announcements::send))
        .route("/announcements/schedule", post(announcements::schedule))
        .route(
            "/announcements/:id",
            get(announcements::get).delete(announcements::remove),
        )
        .route("/leader/new-members", get(new_members::leader_list))
        .nest("/admin", admin_routes)
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth,
        ))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            rate_limit::rate_limit,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/login", post(auth::login))
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(logging::log_requests))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
