//! Reusable staff service runtime.
//!
//! [`ServerHandle`] owns the full server lifecycle: store selection,
//! migrations, admin bootstrap, the REST API and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::{AuthService, BootstrapOutcome};
use crate::config::AppConfig;
use crate::domain::{AdminRepositoryInterface, StaffRepositoryInterface};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::repositories::{AdminRepository, StaffRepository};
use crate::infrastructure::storage::InMemoryStore;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::{create_api_router, init_database};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the staff service.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the configured admin if it does not exist (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── Stores ─────────────────────────────────────────────────────────

/// The repositories the API runs on, plus the connection backing them
/// (absent for the in-memory store).
pub struct Stores {
    pub staff: Arc<dyn StaffRepositoryInterface>,
    pub admins: Arc<dyn AdminRepositoryInterface>,
    pub db: Option<DatabaseConnection>,
}

impl Stores {
    /// Select and open the store named by `database.url`.
    pub async fn connect(config: &AppConfig, auto_migrate: bool) -> Result<Self, BoxError> {
        if config.database.is_memory() {
            warn!("Using in-memory store; data is lost on shutdown");
            let store = Arc::new(InMemoryStore::new());
            return Ok(Self {
                staff: store.clone(),
                admins: store,
                db: None,
            });
        }

        let db = init_database(&config.database.to_database_config()).await?;

        if auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        Ok(Self {
            staff: Arc::new(StaffRepository::new(db.clone())),
            admins: Arc::new(AdminRepository::new(db.clone())),
            db: Some(db),
        })
    }

    pub async fn close(self) {
        let Some(db) = self.db else {
            return;
        };
        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
    }
}

/// Create the configured admin unless it already exists.
pub async fn bootstrap_admin(
    admins: Arc<dyn AdminRepositoryInterface>,
    config: &AppConfig,
) -> Result<BootstrapOutcome, BoxError> {
    let service = AuthService::new(admins, config.security.to_jwt_config());
    let outcome = service
        .bootstrap_admin(&config.admin.username, &config.admin.password, &config.admin.name)
        .await?;

    if let BootstrapOutcome::Created(ref admin) = outcome {
        info!("Default admin created: {}", admin.username);
        warn!("Please change the admin password in the configuration!");
    }
    Ok(outcome)
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running staff service.
///
/// ```rust,no_run
/// use staff_service::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub local_addr: SocketAddr,

    stores_db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Open the store, bootstrap the admin and start serving the API.
    pub async fn start(opts: ServerOptions) -> Result<Self, BoxError> {
        let app_cfg = opts.config;

        info!("Starting staff service...");

        let stores = Stores::connect(&app_cfg, opts.auto_migrate).await?;

        if opts.create_default_admin {
            if let Err(e) = bootstrap_admin(stores.admins.clone(), &app_cfg).await {
                error!("Failed to create admin user: {}", e);
            }
        }

        let jwt_config = app_cfg.security.to_jwt_config();
        info!(
            "JWT configured: access {}m, refresh {}d",
            jwt_config.access_expiration_minutes, jwt_config.refresh_expiration_days
        );

        let api_router = create_api_router(stores.staff, stores.admins, jwt_config);

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();

        let listener = tokio::net::TcpListener::bind(app_cfg.api_address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config: app_cfg,
            local_addr,
            stores_db: stores.db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for shutdown to be triggered, then for in-flight requests to
    /// drain (bounded by `server.shutdown_timeout`).
    pub async fn wait(self) {
        let Self {
            stores_db,
            shutdown,
            api_task,
            ..
        } = self;

        let drained = shutdown
            .shutdown_with_cleanup(|| async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
            })
            .await;
        if !drained {
            warn!("Abandoning in-flight requests");
        }

        if let Some(db) = stores_db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("Database connection closed");
            }
        }

        info!("Staff service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down staff service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` wins over `logging.level`. Call once at process startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("Tracing already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.url = "memory://".into();
        config.server.api_host = "127.0.0.1".into();
        config.server.api_port = 0;
        config.server.shutdown_timeout = 5;
        config.security.jwt_secret = "server-test-secret".into();
        config
    }

    #[tokio::test]
    async fn bootstrap_admin_is_idempotent_over_one_store() {
        let config = memory_config();
        let stores = Stores::connect(&config, true).await.unwrap();

        let first = bootstrap_admin(stores.admins.clone(), &config).await.unwrap();
        let second = bootstrap_admin(stores.admins.clone(), &config).await.unwrap();

        assert!(matches!(first, BootstrapOutcome::Created(_)));
        assert_eq!(second, BootstrapOutcome::AlreadyExists);
    }

    #[tokio::test]
    async fn serves_health_and_shuts_down() {
        let handle = ServerHandle::start(ServerOptions {
            config: memory_config(),
            ..ServerOptions::default()
        })
        .await
        .unwrap();
        assert!(handle.is_running());

        let mut stream = tokio::net::TcpStream::connect(handle.local_addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));

        tokio::time::timeout(std::time::Duration::from_secs(5), handle.shutdown())
            .await
            .unwrap();
    }
}
