//! Staff module: staff creation, lookup and paginated listing

pub mod service;

pub use service::StaffService;
