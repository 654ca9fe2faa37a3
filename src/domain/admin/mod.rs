//! Admin aggregate
//!
//! Administrator accounts that authenticate against the API.

pub mod model;
pub mod repository;

mod dto_create;

pub use dto_create::CreateAdminDto;
pub use model::Admin;
pub use repository::AdminRepositoryInterface;
