//! Staff aggregate
//!
//! Contains the Staff entity, query filter, DTOs, and repository interface.

pub mod filter;
pub mod model;
pub mod repository;

mod dto_create;

pub use model::{Reference, Staff, StaffRelation, StaffRole, StaffSortField};

pub use dto_create::CreateStaffDto;
pub use filter::{resolve_populate, resolve_sort, StaffFilter};

pub use repository::StaffRepositoryInterface;
