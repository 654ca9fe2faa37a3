//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/staff-service/config.toml`).
//! Every section is optional; missing keys fall back to defaults.
//!
//! ```toml
//! [server]
//! api_host = "0.0.0.0"
//! api_port = 3000
//!
//! [database]
//! url = "sqlite://./staff.db?mode=rwc"
//!
//! [security]
//! jwt_secret = "change-me"
//!
//! [admin]
//! username = "admin"
//! password = "change-me-admin"
//!
//! [logging]
//! level = "info"
//! format = "text"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::DatabaseConfig;

/// URL scheme that selects the in-process store instead of a database.
pub const MEMORY_URL_SCHEME: &str = "memory:";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 3000,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SeaORM connection URL, or `memory://` for the in-process store
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
        }
    }
}

impl DatabaseSection {
    pub fn is_memory(&self) -> bool {
        self.url.starts_with(MEMORY_URL_SCHEME)
    }

    pub fn to_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub access_expiration_minutes: i64,
    pub refresh_expiration_days: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            jwt_secret: jwt.secret,
            access_expiration_minutes: jwt.access_expiration_minutes,
            refresh_expiration_days: jwt.refresh_expiration_days,
        }
    }
}

impl SecurityConfig {
    pub fn to_jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            access_expiration_minutes: self.access_expiration_minutes,
            refresh_expiration_days: self.refresh_expiration_days,
            ..JwtConfig::default()
        }
    }
}

/// Account created on first start when no admin with `username` exists
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
    pub name: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "change-me-admin".to_string(),
            name: "Administrator".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive, e.g. `info` or `staff_service=debug,tower_http=info`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults; environment
    /// overrides are applied either way.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// `DATABASE_URL` and `JWT_SECRET` win over the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.is_empty() {
                self.database.url = url;
            }
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            if !secret.is_empty() {
                self.security.jwt_secret = secret;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("security.jwt_secret must not be empty".into()));
        }
        if self.security.access_expiration_minutes <= 0 || self.security.refresh_expiration_days <= 0 {
            return Err(ConfigError::Invalid("token lifetimes must be positive".into()));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must not be empty".into()));
        }
        Ok(())
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.server.api_host, self.server.api_port)
    }
}

/// `<config dir>/staff-service/config.toml`, or `./config.toml` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("staff-service").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.api_port, 3000);
        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            api_port = 8080

            [database]
            url = "memory://"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.api_port, 8080);
        assert_eq!(config.server.api_host, "0.0.0.0");
        assert!(config.database.is_memory());
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn security_section_maps_to_jwt_config() {
        let config = AppConfig::from_toml(
            r#"
            [security]
            jwt_secret = "s3cret"
            access_expiration_minutes = 5
            "#,
        )
        .unwrap();

        let jwt = config.security.to_jwt_config();
        assert_eq!(jwt.secret, "s3cret");
        assert_eq!(jwt.access_expiration_minutes, 5);
        assert_eq!(jwt.refresh_expiration_days, 30);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = std::env::temp_dir().join(format!("staff-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[server\napi_port = ").unwrap();

        let err = AppConfig::load(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn validation_rejects_blank_secret() {
        let mut config = AppConfig::default();
        config.security.jwt_secret = "  ".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
