use async_trait::async_trait;

use super::{Admin, CreateAdminDto};
use crate::shared::DomainResult;

#[async_trait]
pub trait AdminRepositoryInterface: Send + Sync {
    async fn create_admin(&self, dto: CreateAdminDto) -> DomainResult<Admin>;

    async fn get_admin_by_username(&self, username: &str) -> DomainResult<Option<Admin>>;
    async fn get_admin_by_id(&self, id: &str) -> DomainResult<Option<Admin>>;
}
