use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, Statement,
};

use crate::domain::staff::{resolve_populate, resolve_sort};
use crate::domain::{
    CreateStaffDto, DomainError, DomainResult, PageSource, Reference, Staff, StaffFilter,
    StaffRelation, StaffRepositoryInterface, StaffRole, StaffSortField,
};
use crate::infrastructure::database::entities::{admin, staff};
use crate::shared::{PageWindow, SortDirection};

use super::admin_repository::admin_model_to_domain;
use super::is_unique_violation;

pub struct StaffRepository {
    db: DatabaseConnection,
}

impl StaffRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: staff::StaffRole) -> StaffRole {
    match role {
        staff::StaffRole::Nurse => StaffRole::Nurse,
        staff::StaffRole::Doctor => StaffRole::Doctor,
        staff::StaffRole::Technician => StaffRole::Technician,
        staff::StaffRole::Admin => StaffRole::Admin,
    }
}

fn domain_role_to_entity(role: StaffRole) -> staff::StaffRole {
    match role {
        StaffRole::Nurse => staff::StaffRole::Nurse,
        StaffRole::Doctor => staff::StaffRole::Doctor,
        StaffRole::Technician => staff::StaffRole::Technician,
        StaffRole::Admin => staff::StaffRole::Admin,
    }
}

fn sort_field_to_column(field: StaffSortField) -> staff::Column {
    match field {
        StaffSortField::Name => staff::Column::Name,
        StaffSortField::Email => staff::Column::Email,
        StaffSortField::Role => staff::Column::Role,
        StaffSortField::CreatedAt => staff::Column::CreatedAt,
        StaffSortField::UpdatedAt => staff::Column::UpdatedAt,
    }
}

fn staff_model_to_domain(model: staff::Model) -> DomainResult<Staff> {
    let shift_preferences: Vec<String> = serde_json::from_str(&model.shift_preferences)
        .map_err(|e| DomainError::Storage(format!("Corrupt shift preferences: {}", e)))?;

    Ok(Staff {
        id: model.id,
        name: model.name,
        email: model.email,
        role: entity_role_to_domain(model.role),
        shift_preferences,
        created_by: model.created_by.map(Reference::Id),
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

/// SQLite binds OFFSET/LIMIT as signed 64-bit integers.
const MAX_BOUND: u64 = i64::MAX as u64;

fn apply_filter(mut query: Select<staff::Entity>, filter: &StaffFilter) -> Select<staff::Entity> {
    if let Some(ref name) = filter.name {
        query = query.filter(staff::Column::Name.eq(name.as_str()));
    }
    if let Some(role) = filter.role {
        query = query.filter(staff::Column::Role.eq(domain_role_to_entity(role)));
    }
    if let Some(ref email) = filter.email {
        query = query.filter(staff::Column::Email.eq(email.as_str()));
    }
    query
}

impl StaffRepository {
    /// Replace `created_by` ids with the referenced admins, one query per page.
    async fn populate_created_by(&self, page: &mut [Staff]) -> DomainResult<()> {
        let ids: Vec<String> = page
            .iter()
            .filter_map(|s| s.created_by.as_ref().map(|r| r.id().to_string()))
            .collect();
        if ids.is_empty() {
            return Ok(());
        }

        let admins: HashMap<String, _> = admin::Entity::find()
            .filter(admin::Column::Id.is_in(ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.id.clone(), admin_model_to_domain(m)))
            .collect();

        for staff in page.iter_mut() {
            staff.created_by = staff
                .created_by
                .take()
                .map(|r| r.resolve(|id| admins.get(id).cloned()));
        }
        Ok(())
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl PageSource for StaffRepository {
    type Item = Staff;
    type Filter = StaffFilter;

    async fn count_matching(&self, filter: &StaffFilter) -> DomainResult<u64> {
        let count = apply_filter(staff::Entity::find(), filter)
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn find_matching(
        &self,
        filter: &StaffFilter,
        window: &PageWindow,
    ) -> DomainResult<Vec<Staff>> {
        let sort = resolve_sort(&window.sort)?;
        let populate = resolve_populate(&window.populate)?;

        if window.skip > MAX_BOUND || window.limit == 0 {
            return Ok(Vec::new());
        }

        let mut query = apply_filter(staff::Entity::find(), filter);
        for (field, direction) in sort {
            let order = match direction {
                SortDirection::Asc => Order::Asc,
                SortDirection::Desc => Order::Desc,
            };
            query = query.order_by(sort_field_to_column(field), order);
        }
        // Ties (and unsorted reads) fall back to insertion order.
        query = query.order_by_asc(staff::Column::Seq);

        let models = query
            .offset(window.skip)
            .limit(window.limit.min(MAX_BOUND))
            .all(&self.db)
            .await?;

        let mut page = models
            .into_iter()
            .map(staff_model_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;

        if populate.contains(&StaffRelation::CreatedBy) {
            self.populate_created_by(&mut page).await?;
        }

        Ok(page)
    }
}

#[async_trait]
impl StaffRepositoryInterface for StaffRepository {
    async fn create_staff(&self, dto: CreateStaffDto) -> DomainResult<Staff> {
        let now = Utc::now();
        let shift_preferences = serde_json::to_string(&dto.shift_preferences)
            .map_err(|e| DomainError::Validation(format!("Invalid shift preferences: {}", e)))?;

        let new_staff = staff::ActiveModel {
            seq: NotSet,
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(dto.name),
            email: Set(dto.email),
            role: Set(domain_role_to_entity(dto.role)),
            shift_preferences: Set(shift_preferences),
            created_by: Set(dto.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_staff.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("Email already taken".to_string())
            } else {
                DomainError::from(e)
            }
        })?;

        staff_model_to_domain(model)
    }

    async fn get_staff_by_id(&self, id: &str) -> DomainResult<Option<Staff>> {
        let model = staff::Entity::find()
            .filter(staff::Column::Id.eq(id))
            .one(&self.db)
            .await?;

        model.map(staff_model_to_domain).transpose()
    }

    async fn is_email_taken(&self, email: &str, exclude_id: Option<&str>) -> DomainResult<bool> {
        let mut query = staff::Entity::find().filter(staff::Column::Email.eq(email));
        if let Some(id) = exclude_id {
            query = query.filter(staff::Column::Id.ne(id));
        }
        Ok(query.one(&self.db).await?.is_some())
    }

    async fn ping(&self) -> DomainResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}
