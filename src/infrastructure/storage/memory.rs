//! In-memory storage implementation
//!
//! Keeps staff in insertion order so unsorted and tied reads follow
//! creation order, like a document collection's natural order.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::RwLock;

use crate::domain::staff::{resolve_populate, resolve_sort};
use crate::domain::{
    Admin, AdminRepositoryInterface, CreateAdminDto, CreateStaffDto, DomainError, DomainResult,
    PageSource, Reference, Staff, StaffFilter, StaffRelation, StaffRepositoryInterface,
    StaffSortField,
};
use crate::shared::{PageWindow, SortDirection};

/// In-memory storage for development and testing
pub struct InMemoryStore {
    staff: RwLock<Vec<Staff>>,
    admins: DashMap<String, Admin>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            staff: RwLock::new(Vec::new()),
            admins: DashMap::new(),
        }
    }

    fn populate_created_by(&self, staff: &mut Staff) {
        staff.created_by = staff.created_by.take().map(|reference| {
            reference.resolve(|id| self.admins.get(id).map(|admin| admin.value().clone()))
        });
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn compare_field(a: &Staff, b: &Staff, field: StaffSortField) -> Ordering {
    match field {
        StaffSortField::Name => a.name.cmp(&b.name),
        StaffSortField::Email => a.email.cmp(&b.email),
        StaffSortField::Role => a.role.as_str().cmp(b.role.as_str()),
        StaffSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        StaffSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

fn compare_by(a: &Staff, b: &Staff, keys: &[(StaffSortField, SortDirection)]) -> Ordering {
    keys.iter()
        .map(|(field, direction)| match direction {
            SortDirection::Asc => compare_field(a, b, *field),
            SortDirection::Desc => compare_field(b, a, *field),
        })
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[async_trait]
impl PageSource for InMemoryStore {
    type Item = Staff;
    type Filter = StaffFilter;

    async fn count_matching(&self, filter: &StaffFilter) -> DomainResult<u64> {
        let staff = self.staff.read().await;
        Ok(staff.iter().filter(|s| filter.matches(s)).count() as u64)
    }

    async fn find_matching(
        &self,
        filter: &StaffFilter,
        window: &PageWindow,
    ) -> DomainResult<Vec<Staff>> {
        let sort = resolve_sort(&window.sort)?;
        let populate = resolve_populate(&window.populate)?;

        let mut matched: Vec<Staff> = {
            let staff = self.staff.read().await;
            staff.iter().filter(|s| filter.matches(s)).cloned().collect()
        };

        // `sort_by` is stable, so ties keep insertion order.
        if !sort.is_empty() {
            matched.sort_by(|a, b| compare_by(a, b, &sort));
        }

        let mut page: Vec<Staff> = matched
            .into_iter()
            .skip(usize::try_from(window.skip).unwrap_or(usize::MAX))
            .take(usize::try_from(window.limit).unwrap_or(usize::MAX))
            .collect();

        if populate.contains(&StaffRelation::CreatedBy) {
            for staff in &mut page {
                self.populate_created_by(staff);
            }
        }

        Ok(page)
    }
}

#[async_trait]
impl StaffRepositoryInterface for InMemoryStore {
    async fn create_staff(&self, dto: CreateStaffDto) -> DomainResult<Staff> {
        let mut staff = self.staff.write().await;

        if staff.iter().any(|s| s.email == dto.email) {
            return Err(DomainError::Conflict("Email already taken".into()));
        }

        let now = Utc::now();
        let record = Staff {
            id: uuid::Uuid::new_v4().to_string(),
            name: dto.name,
            email: dto.email,
            role: dto.role,
            shift_preferences: dto.shift_preferences,
            created_by: dto.created_by.map(Reference::Id),
            created_at: now,
            updated_at: now,
        };
        staff.push(record.clone());

        Ok(record)
    }

    async fn get_staff_by_id(&self, id: &str) -> DomainResult<Option<Staff>> {
        let staff = self.staff.read().await;
        Ok(staff.iter().find(|s| s.id == id).cloned())
    }

    async fn is_email_taken(&self, email: &str, exclude_id: Option<&str>) -> DomainResult<bool> {
        let staff = self.staff.read().await;
        Ok(staff
            .iter()
            .any(|s| s.email == email && Some(s.id.as_str()) != exclude_id))
    }

    async fn ping(&self) -> DomainResult<()> {
        Ok(())
    }
}

#[async_trait]
impl AdminRepositoryInterface for InMemoryStore {
    async fn create_admin(&self, dto: CreateAdminDto) -> DomainResult<Admin> {
        if self.admins.iter().any(|a| a.username == dto.username) {
            return Err(DomainError::Conflict("Username already exists".into()));
        }

        let now = Utc::now();
        let admin = Admin {
            id: uuid::Uuid::new_v4().to_string(),
            username: dto.username,
            password_hash: dto.password_hash,
            name: dto.name,
            created_at: now,
            updated_at: now,
        };
        self.admins.insert(admin.id.clone(), admin.clone());

        Ok(admin)
    }

    async fn get_admin_by_username(&self, username: &str) -> DomainResult<Option<Admin>> {
        Ok(self
            .admins
            .iter()
            .find(|a| a.username == username)
            .map(|a| a.value().clone()))
    }

    async fn get_admin_by_id(&self, id: &str) -> DomainResult<Option<Admin>> {
        Ok(self.admins.get(id).map(|a| a.value().clone()))
    }
}
