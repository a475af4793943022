//! Authentication service implementation
//!
//! This service handles leader login, API token issuance and verification,
//! and role-based permission checks. Tokens are HS256 JWTs carrying the
//! leader id, church id, and role.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::settings::Settings;
use crate::database::LeaderRepository;
use crate::models::leader::{Leader, LeaderRole, LoginRequest, LoginResponse};
use crate::utils::errors::{FlockKeeperError, Result};

/// JWT claims carried by every API token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Leader ID
    pub sub: i64,
    pub church_id: i64,
    pub role: LeaderRole,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated request context, inserted by the auth middleware
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub leader_id: i64,
    pub church_id: i64,
    pub role: LeaderRole,
}

impl AuthContext {
    /// Whether this principal holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role == LeaderRole::Admin
    }
}

/// Authentication service for login and token management
#[derive(Clone)]
pub struct AuthService {
    leader_repository: LeaderRepository,
    settings: Settings,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(leader_repository: LeaderRepository, settings: Settings) -> Self {
        Self {
            leader_repository,
            settings,
        }
    }

    /// Log a leader in with email and access code, returning a fresh token
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        debug!(email = %request.email, "Login attempt");

        let leader = self
            .leader_repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login for unknown email");
                FlockKeeperError::Authentication("Invalid email or access code".to_string())
            })?;

        if !leader.active {
            warn!(leader_id = leader.id, "Login attempt for deactivated account");
            return Err(FlockKeeperError::Authentication(
                "Account is deactivated".to_string(),
            ));
        }

        if leader.access_code != request.access_code {
            warn!(leader_id = leader.id, "Login with wrong access code");
            return Err(FlockKeeperError::Authentication(
                "Invalid email or access code".to_string(),
            ));
        }

        let token = self.issue_token(&leader)?;
        info!(leader_id = leader.id, church_id = leader.church_id, "Leader logged in");

        Ok(LoginResponse {
            token,
            leader_id: leader.id,
            church_id: leader.church_id,
            role: leader.role,
        })
    }

    /// Issue a signed token for a leader
    pub fn issue_token(&self, leader: &Leader) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: leader.id,
            church_id: leader.church_id,
            role: leader.role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.settings.auth.token_ttl_hours)).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.auth.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify a bearer token and build the request's auth context
    pub fn verify_token(&self, token: &str) -> Result<AuthContext> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.auth.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(AuthContext {
            leader_id: data.claims.sub,
            church_id: data.claims.church_id,
            role: data.claims.role,
        })
    }

    /// Require the admin role or return a permission error
    pub fn require_admin(&self, context: &AuthContext) -> Result<()> {
        if context.is_admin() {
            debug!(leader_id = context.leader_id, "Admin authorization successful");
            Ok(())
        } else {
            warn!(leader_id = context.leader_id, "Unauthorized admin access attempt");
            Err(FlockKeeperError::PermissionDenied(
                "Admin privileges required".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn test_settings() -> Settings {
        let mut settings = Settings::default();
        settings.auth.jwt_secret = "unit-test-secret-0123456789-0123456789".to_string();
        settings
    }

    fn test_service(settings: Settings) -> AuthService {
        let pool = PgPoolOptions::new().connect_lazy("postgresql://localhost/unused").unwrap();
        AuthService::new(LeaderRepository::new(pool), settings)
    }

    fn test_leader(role: LeaderRole) -> Leader {
        Leader {
            id: 7,
            church_id: 3,
            name: "Ana Reyes".to_string(),
            email: "ana@gracechapel.org".to_string(),
            access_code: "candlelight".to_string(),
            role,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_token_round_trip() {
        let service = test_service(test_settings());
        let leader = test_leader(LeaderRole::Leader);

        let token = service.issue_token(&leader).unwrap();
        let context = service.verify_token(&token).unwrap();

        assert_eq!(context.leader_id, 7);
        assert_eq!(context.church_id, 3);
        assert_eq!(context.role, LeaderRole::Leader);
        assert!(!context.is_admin());
    }

    #[tokio::test]
    async fn test_token_rejected_with_wrong_secret() {
        let service = test_service(test_settings());
        let leader = test_leader(LeaderRole::Admin);
        let token = service.issue_token(&leader).unwrap();

        let mut other_settings = test_settings();
        other_settings.auth.jwt_secret = "a-completely-different-secret-value-42".to_string();
        let other = test_service(other_settings);

        assert!(other.verify_token(&token).is_err());
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let mut settings = test_settings();
        settings.auth.token_ttl_hours = -2;
        let service = test_service(settings);
        let leader = test_leader(LeaderRole::Leader);

        let token = service.issue_token(&leader).unwrap();
        assert!(service.verify_token(&token).is_err());
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let service = test_service(test_settings());
        assert!(service.verify_token("not-a-jwt").is_err());
    }

    #[tokio::test]
    async fn test_require_admin() {
        let service = test_service(test_settings());

        let admin = AuthContext {
            leader_id: 1,
            church_id: 1,
            role: LeaderRole::Admin,
        };
        let leader = AuthContext {
            leader_id: 2,
            church_id: 1,
            role: LeaderRole::Leader,
        };

        assert!(service.require_admin(&admin).is_ok());
        assert!(service.require_admin(&leader).is_err());
    }
}
