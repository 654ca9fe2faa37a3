//! Staff management service: application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate here.

use std::sync::Arc;

use tracing::info;

use crate::application::pagination::PaginationEngine;
use crate::domain::{CreateStaffDto, DomainError, DomainResult, Staff, StaffFilter, StaffRepositoryInterface};
use crate::shared::{Page, QueryOptions};

/// Staff service, generic over the repository so tests can swap stores.
pub struct StaffService<R: StaffRepositoryInterface + ?Sized> {
    repo: Arc<R>,
    paginator: PaginationEngine<R>,
}

impl<R: StaffRepositoryInterface + ?Sized> StaffService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            paginator: PaginationEngine::new(Arc::clone(&repo)),
            repo,
        }
    }

    /// Create a staff member. Emails are unique across all staff.
    pub async fn create_staff(&self, dto: CreateStaffDto) -> DomainResult<Staff> {
        let dto = dto.normalized();

        if self.repo.is_email_taken(&dto.email, None).await? {
            return Err(DomainError::Conflict("Email already taken".into()));
        }

        let staff = self.repo.create_staff(dto).await?;
        info!(staff_id = %staff.id, role = %staff.role, "Staff member created");
        Ok(staff)
    }

    /// List staff with filtering, sorting, population and pagination.
    pub async fn query_staff(
        &self,
        filter: &StaffFilter,
        options: &QueryOptions,
    ) -> DomainResult<Page<Staff>> {
        self.paginator.paginate(filter, options).await
    }

    pub async fn get_staff_by_id(&self, id: &str) -> DomainResult<Option<Staff>> {
        self.repo.get_staff_by_id(id).await
    }

    /// Store reachability, for the health endpoint.
    pub async fn ping(&self) -> DomainResult<()> {
        self.repo.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Reference, StaffRole};
    use crate::infrastructure::storage::InMemoryStore;

    fn new_staff(name: &str, email: &str, role: StaffRole) -> CreateStaffDto {
        CreateStaffDto {
            name: name.into(),
            email: email.into(),
            role,
            shift_preferences: vec![],
            created_by: None,
        }
    }

    fn service() -> StaffService<InMemoryStore> {
        StaffService::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn create_normalizes_name_and_email() {
        let service = service();

        let staff = service
            .create_staff(new_staff("  Ada Lovelace ", " Ada@Example.COM ", StaffRole::Doctor))
            .await
            .unwrap();

        assert_eq!(staff.name, "Ada Lovelace");
        assert_eq!(staff.email, "ada@example.com");
        assert!(staff.shift_preferences.is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let service = service();
        service
            .create_staff(new_staff("A", "a@example.com", StaffRole::Nurse))
            .await
            .unwrap();

        let err = service
            .create_staff(new_staff("B", "A@EXAMPLE.com", StaffRole::Nurse))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(msg) if msg == "Email already taken"));
    }

    #[tokio::test]
    async fn get_by_id_returns_none_for_unknown_id() {
        let service = service();
        assert!(service.get_staff_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn query_filters_by_role_and_pages() {
        let service = service();
        for i in 0..7 {
            let role = if i % 2 == 0 { StaffRole::Nurse } else { StaffRole::Doctor };
            service
                .create_staff(new_staff(&format!("s{i}"), &format!("s{i}@example.com"), role))
                .await
                .unwrap();
        }

        let filter = StaffFilter::new(None, Some(StaffRole::Nurse), None);
        let options = QueryOptions {
            limit: Some(3),
            page: Some(2),
            ..Default::default()
        };
        let page = service.query_staff(&filter, &options).await.unwrap();

        assert_eq!(page.total_results, 4);
        assert_eq!(page.total_pages, 2);
        let names: Vec<_> = page.results.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["s6"]);
    }

    #[tokio::test]
    async fn created_by_is_kept_as_reference() {
        let service = service();
        let mut dto = new_staff("C", "c@example.com", StaffRole::Technician);
        dto.created_by = Some("admin-1".into());

        let staff = service.create_staff(dto).await.unwrap();

        assert_eq!(staff.created_by, Some(Reference::Id("admin-1".into())));
    }
}
