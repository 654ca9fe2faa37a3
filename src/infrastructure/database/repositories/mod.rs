//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories.

pub mod admin_repository;
pub mod staff_repository;

pub use admin_repository::AdminRepository;
pub use staff_repository::StaffRepository;

/// Whether the driver rejected a write on a unique index.
fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    matches!(
        e.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}
