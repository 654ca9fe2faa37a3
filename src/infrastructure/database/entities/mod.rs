//! Database entities module

pub mod admin;
pub mod staff;

pub use admin::Entity as Admin;
pub use staff::Entity as Staff;
