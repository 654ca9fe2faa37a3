//! Domain layer: aggregates, repository ports and the page source seam.

pub mod admin;
pub mod pagination;
pub mod staff;

pub use admin::{Admin, AdminRepositoryInterface, CreateAdminDto};
pub use pagination::PageSource;
pub use staff::{
    CreateStaffDto, Reference, Staff, StaffFilter, StaffRelation, StaffRepositoryInterface,
    StaffRole, StaffSortField,
};

pub use crate::shared::{DomainError, DomainResult};
