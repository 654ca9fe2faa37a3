pub mod entities;
pub mod migrator;
pub mod repositories;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./staff.db?mode=rwc")
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./staff.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Self::default()
        }
    }

    /// In-memory SQLite databases live and die with a single connection.
    fn is_sqlite_memory(&self) -> bool {
        self.url.starts_with("sqlite:") && self.url.contains(":memory:")
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);

    let mut opts = ConnectOptions::new(config.url.clone());
    if config.is_sqlite_memory() {
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(config.max_connections);
    }
    opts.connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let db = Database::connect(opts).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Fresh migrated in-memory SQLite database.
#[cfg(test)]
pub(crate) async fn test_connection() -> DatabaseConnection {
    use sea_orm_migration::MigratorTrait;

    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let db = init_database(&config).await.unwrap();
    migrator::Migrator::up(&db, None).await.unwrap();
    db
}
