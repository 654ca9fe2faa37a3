//! Staff module: create, list and fetch staff members

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
