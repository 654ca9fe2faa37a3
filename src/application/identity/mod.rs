//! Identity module: admin authentication and bootstrap
//!
//! Contains the `AuthService` which issues tokens for admins and creates
//! the initial admin account.

pub mod service;

pub use service::{AuthResult, AuthService, AuthTokens, BootstrapOutcome, IssuedToken};
