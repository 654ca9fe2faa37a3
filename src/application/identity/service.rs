//! Admin authentication service: application-layer orchestration
//!
//! Login with username + password, token issuance, and the one-shot
//! admin bootstrap used at startup and by the CLI.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::{Admin, AdminRepositoryInterface, CreateAdminDto, DomainError, DomainResult};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig, TokenType};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// A signed token and when it stops being valid
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires: DateTime<Utc>,
}

/// Access + refresh token pair
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub admin: Admin,
    pub tokens: AuthTokens,
}

/// Outcome of [`AuthService::bootstrap_admin`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created(Admin),
    AlreadyExists,
}

pub struct AuthService<R: AdminRepositoryInterface + ?Sized> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
}

impl<R: AdminRepositoryInterface + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, jwt_config: JwtConfig) -> Self {
        Self { repo, jwt_config }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate an admin and issue an access/refresh token pair.
    pub async fn login_admin(&self, username: &str, password: &str) -> DomainResult<AuthResult> {
        let admin = self.repo.get_admin_by_username(username).await?;

        let Some(admin) = admin else {
            warn!(username, "Login attempt for unknown admin");
            return Err(incorrect_credentials());
        };

        let valid = verify_password(password, &admin.password_hash).unwrap_or(false);
        if !valid {
            warn!(admin_id = %admin.id, "Login attempt with wrong password");
            return Err(incorrect_credentials());
        }

        let tokens = self.generate_auth_tokens(&admin)?;
        info!(admin_id = %admin.id, "Admin logged in");

        Ok(AuthResult { admin, tokens })
    }

    pub fn generate_auth_tokens(&self, admin: &Admin) -> DomainResult<AuthTokens> {
        Ok(AuthTokens {
            access: self.issue(admin, TokenType::Access)?,
            refresh: self.issue(admin, TokenType::Refresh)?,
        })
    }

    fn issue(&self, admin: &Admin, token_type: TokenType) -> DomainResult<IssuedToken> {
        let (token, expires) = create_token(&admin.id, &admin.username, token_type, &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;
        Ok(IssuedToken { token, expires })
    }

    // ── Bootstrap ───────────────────────────────────────────────

    /// Create the admin account unless one with `username` already exists.
    pub async fn bootstrap_admin(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> DomainResult<BootstrapOutcome> {
        if self.repo.get_admin_by_username(username).await?.is_some() {
            info!(username, "Admin already exists");
            return Ok(BootstrapOutcome::AlreadyExists);
        }

        if password.len() < 8 {
            return Err(DomainError::Validation(
                "Admin password must be at least 8 characters".into(),
            ));
        }

        let password_hash = hash_password(password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

        let admin = self
            .repo
            .create_admin(CreateAdminDto {
                username: username.to_string(),
                password_hash,
                name: name.to_string(),
            })
            .await?;

        info!(admin_id = %admin.id, username = %admin.username, "Admin created");
        Ok(BootstrapOutcome::Created(admin))
    }
}

fn incorrect_credentials() -> DomainError {
    DomainError::Unauthorized("Incorrect username or password".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::jwt::verify_token;
    use crate::infrastructure::storage::InMemoryStore;

    fn service() -> AuthService<InMemoryStore> {
        let config = JwtConfig {
            secret: "test-secret".into(),
            ..JwtConfig::default()
        };
        AuthService::new(Arc::new(InMemoryStore::new()), config)
    }

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let service = service();

        let first = service.bootstrap_admin("root", "password123", "Root").await.unwrap();
        let second = service.bootstrap_admin("root", "other-password", "Root").await.unwrap();

        assert!(matches!(first, BootstrapOutcome::Created(ref a) if a.username == "root"));
        assert_eq!(second, BootstrapOutcome::AlreadyExists);
    }

    #[tokio::test]
    async fn bootstrap_rejects_short_password() {
        let err = service().bootstrap_admin("root", "short", "Root").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn login_issues_access_and_refresh_tokens() {
        let service = service();
        service.bootstrap_admin("root", "password123", "Root").await.unwrap();

        let result = service.login_admin("root", "password123").await.unwrap();

        let access = verify_token(&result.tokens.access.token, service.jwt_config()).unwrap();
        let refresh = verify_token(&result.tokens.refresh.token, service.jwt_config()).unwrap();
        assert_eq!(access.sub, result.admin.id);
        assert_eq!(access.token_type, TokenType::Access);
        assert_eq!(refresh.token_type, TokenType::Refresh);
        assert!(result.tokens.refresh.expires > result.tokens.access.expires);
    }

    #[tokio::test]
    async fn login_with_wrong_password_or_unknown_user_fails_identically() {
        let service = service();
        service.bootstrap_admin("root", "password123", "Root").await.unwrap();

        let wrong_password = service.login_admin("root", "nope-nope").await.unwrap_err();
        let unknown_user = service.login_admin("ghost", "password123").await.unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(matches!(wrong_password, DomainError::Unauthorized(_)));
    }
}
