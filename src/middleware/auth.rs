//! Authentication middleware
//!
//! Verifies the bearer token on incoming requests, inserts the resulting
//! [`AuthContext`] into request extensions, and gates admin-only routes.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use crate::handlers::AppState;
use crate::services::AuthContext;
use crate::utils::errors::{FlockKeeperError, Result};

/// Pull the bearer token out of the Authorization header
fn bearer_token(request: &Request) -> Result<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| {
            FlockKeeperError::Authentication("Missing bearer token".to_string())
        })
}

/// Require a valid token on every request passing through
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let token = bearer_token(&request)?;
    let context = state.services.auth_service.verify_token(token)?;

    debug!(
        leader_id = context.leader_id,
        church_id = context.church_id,
        "Request authenticated"
    );
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

/// Require the admin role; must run after [`require_auth`]
pub async fn require_admin(request: Request, next: Next) -> Result<Response> {
    let context = request
        .extensions()
        .get::<AuthContext>()
        .cloned()
        .ok_or_else(|| FlockKeeperError::Authentication("Missing auth context".to_string()))?;

    if !context.is_admin() {
        warn!(leader_id = context.leader_id, "Unauthorized admin access attempt");
        return Err(FlockKeeperError::PermissionDenied(
            "Admin privileges required".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
