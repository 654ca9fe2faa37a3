//! JWT Token handling

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Access token lifetime in minutes
    pub access_expiration_minutes: i64,
    /// Refresh token lifetime in days
    pub refresh_expiration_days: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secret-key-change-in-production".to_string()),
            access_expiration_minutes: 30,
            refresh_expiration_days: 30,
            issuer: "staff-service".to_string(),
        }
    }
}

impl JwtConfig {
    fn lifetime(&self, token_type: TokenType) -> Duration {
        match token_type {
            TokenType::Access => Duration::minutes(self.access_expiration_minutes),
            TokenType::Refresh => Duration::days(self.refresh_expiration_days),
        }
    }
}

/// Kind of token; refresh tokens are not accepted as access credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (admin ID)
    pub sub: String,
    /// Username
    pub username: String,
    /// Token kind
    pub token_type: TokenType,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    pub fn new(subject: &str, username: &str, token_type: TokenType, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + config.lifetime(token_type);

        Self {
            sub: subject.to_string(),
            username: username.to_string(),
            token_type,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}

/// Create a signed token; returns the token and its expiry.
pub fn create_token(
    subject: &str,
    username: &str,
    token_type: TokenType,
    config: &JwtConfig,
) -> Result<(String, DateTime<Utc>), jsonwebtoken::errors::Error> {
    let claims = TokenClaims::new(subject, username, token_type, config);

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok((token, claims.expires_at()))
}

/// Verify and decode a JWT token
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            ..JwtConfig::default()
        }
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = config();
        let (token, expires) = create_token("admin-123", "root", TokenType::Access, &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "admin-123");
        assert_eq!(claims.username, "root");
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(!claims.is_expired());
        assert_eq!(claims.expires_at(), expires);
    }

    #[test]
    fn refresh_outlives_access() {
        let config = config();
        let (_, access_exp) = create_token("a", "root", TokenType::Access, &config).unwrap();
        let (_, refresh_exp) = create_token("a", "root", TokenType::Refresh, &config).unwrap();
        assert!(refresh_exp > access_exp);
    }

    #[test]
    fn test_invalid_token() {
        assert!(verify_token("invalid-token", &config()).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let (token, _) = create_token("a", "root", TokenType::Access, &config()).unwrap();
        let other = JwtConfig {
            secret: "other".into(),
            ..config()
        };
        assert!(verify_token(&token, &other).is_err());
    }
}
