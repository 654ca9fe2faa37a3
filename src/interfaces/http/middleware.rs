//! Authentication middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims, TokenType};
use crate::interfaces::http::common::ApiResponse;

/// Authentication error types
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    WrongTokenType,
}

/// State for [`auth_middleware`]
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// The admin behind an access token, available to handlers via
/// `Extension<AuthenticatedAdmin>`.
#[derive(Clone, Debug)]
pub struct AuthenticatedAdmin {
    pub admin_id: String,
    pub username: String,
}

impl AuthenticatedAdmin {
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            admin_id: claims.sub,
            username: claims.username,
        }
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Check a bearer header value; only unexpired access tokens pass.
pub fn authenticate(auth_header: Option<&str>, config: &JwtConfig) -> Result<AuthenticatedAdmin, AuthError> {
    let auth_header = auth_header.ok_or(AuthError::MissingToken)?;
    let token = extract_token(auth_header).ok_or(AuthError::InvalidToken)?;

    let claims = verify_token(token, config).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        _ => AuthError::InvalidToken,
    })?;

    if claims.is_expired() {
        return Err(AuthError::ExpiredToken);
    }
    if claims.token_type != TokenType::Access {
        return Err(AuthError::WrongTokenType);
    }

    Ok(AuthenticatedAdmin::from_claims(claims))
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match authenticate(auth_header, &auth_state.jwt_config) {
        Ok(admin) => {
            request.extensions_mut().insert(admin);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Rejected request");
            auth_error_response(e)
        }
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let message = match error {
        AuthError::MissingToken => "Please authenticate",
        AuthError::InvalidToken => "Invalid authentication token",
        AuthError::ExpiredToken => "Token has expired",
        AuthError::WrongTokenType => "Access token required",
    };

    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(message)),
    )
        .into_response()
}
