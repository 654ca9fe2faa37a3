//! Application layer: use-case services and the pagination engine.

pub mod identity;
pub mod pagination;
pub mod staff;

pub use identity::{AuthResult, AuthService, AuthTokens, BootstrapOutcome};
pub use pagination::PaginationEngine;
pub use staff::StaffService;
