//! Authentication DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::identity::IssuedToken;
use crate::application::{AuthResult, AuthTokens};
use crate::domain::Admin;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AdminLoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Admin as exposed over the API; the password hash never leaves the server.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDto {
    pub id: String,
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Admin> for AdminDto {
    fn from(a: Admin) -> Self {
        Self {
            id: a.id,
            username: a.username,
            name: a.name,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenDto {
    pub token: String,
    pub expires: DateTime<Utc>,
}

impl From<IssuedToken> for TokenDto {
    fn from(t: IssuedToken) -> Self {
        Self {
            token: t.token,
            expires: t.expires,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthTokensDto {
    pub access: TokenDto,
    pub refresh: TokenDto,
}

impl From<AuthTokens> for AuthTokensDto {
    fn from(t: AuthTokens) -> Self {
        Self {
            access: t.access.into(),
            refresh: t.refresh.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminLoginResponse {
    pub user: AdminDto,
    pub tokens: AuthTokensDto,
}

impl From<AuthResult> for AdminLoginResponse {
    fn from(r: AuthResult) -> Self {
        Self {
            user: r.admin.into(),
            tokens: r.tokens.into(),
        }
    }
}
