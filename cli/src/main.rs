//! Staff service: CLI server
//!
//! ```sh
//! # Run with default config (~/.config/staff-service/config.toml)
//! staff-service
//!
//! # Custom config path and port
//! staff-service --config /etc/staff-service/config.toml --api-port 8080
//!
//! # Validate config without starting
//! staff-service --check
//!
//! # Create the configured admin account and exit
//! staff-service --create-admin
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};

use staff_service::application::BootstrapOutcome;
use staff_service::config::AppConfig;
use staff_service::server::{bootstrap_admin, init_tracing, ServerHandle, ServerOptions, Stores};

/// Staff service: REST API for hospital staff management.
#[derive(Parser, Debug)]
#[command(
    name = "staff-service",
    version,
    about = "REST API for staff management with admin authentication",
    long_about = "Staff service: admin login plus paginated staff management.\n\n\
                  Default config: ~/.config/staff-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "STAFF_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the configured admin account.
    #[arg(long)]
    no_admin: bool,

    /// Create the configured admin account (if missing) and exit.
    #[arg(long, conflicts_with_all = ["check", "no_admin"])]
    create_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(staff_service::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            if cli.check {
                eprintln!("Configuration is invalid: {}", e);
                std::process::exit(1);
            }
            (AppConfig::default(), Some(e))
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.api_address());
        println!("   Database    : {}", config.database.url);
        println!("   Admin       : {}", config.admin.username);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── One-shot admin creation ────────────────────────────────
    if cli.create_admin {
        if config.database.is_memory() {
            warn!("In-memory store selected; the admin will not outlive this process");
        }
        let stores = Stores::connect(&config, !cli.no_migrate).await?;
        let outcome = bootstrap_admin(stores.admins.clone(), &config).await;
        stores.close().await;

        match outcome? {
            BootstrapOutcome::Created(admin) => println!("Admin '{}' created", admin.username),
            BootstrapOutcome::AlreadyExists => {
                println!("Admin '{}' already exists", config.admin.username)
            }
        }
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;

    Ok(())
}
