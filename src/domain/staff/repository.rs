use async_trait::async_trait;

use super::{CreateStaffDto, Staff, StaffFilter};
use crate::domain::PageSource;
use crate::shared::DomainResult;

#[async_trait]
pub trait StaffRepositoryInterface: PageSource<Item = Staff, Filter = StaffFilter> {
    async fn create_staff(&self, dto: CreateStaffDto) -> DomainResult<Staff>;

    async fn get_staff_by_id(&self, id: &str) -> DomainResult<Option<Staff>>;

    /// Whether another staff member (other than `exclude_id`) uses `email`.
    async fn is_email_taken(&self, email: &str, exclude_id: Option<&str>) -> DomainResult<bool>;

    /// Cheap round-trip to the store, for health checks.
    async fn ping(&self) -> DomainResult<()>;
}
