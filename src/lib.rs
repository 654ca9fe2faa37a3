//! # Staff Service
//!
//! REST backend for hospital staff management: admin authentication,
//! staff records and a generic pagination engine over pluggable stores.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **shared**: error and pagination types, shutdown signalling
//! - **domain**: aggregates, repository ports and the `PageSource` seam
//! - **application**: use-case services and the `PaginationEngine`
//! - **infrastructure**: SeaORM repositories, in-memory store, crypto
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: runtime wiring shared by the CLI and tests

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig};

pub use interfaces::http::create_api_router;
