use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{Admin, AdminRepositoryInterface, CreateAdminDto, DomainError, DomainResult};
use crate::infrastructure::database::entities::admin;

use super::is_unique_violation;

pub struct AdminRepository {
    db: DatabaseConnection,
}

impl AdminRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(super) fn admin_model_to_domain(model: admin::Model) -> Admin {
    Admin {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        name: model.name,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl AdminRepositoryInterface for AdminRepository {
    async fn create_admin(&self, dto: CreateAdminDto) -> DomainResult<Admin> {
        let now = Utc::now();

        let new_admin = admin::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            username: Set(dto.username),
            password_hash: Set(dto.password_hash),
            name: Set(dto.name),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_admin.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("Username already exists".to_string())
            } else {
                DomainError::from(e)
            }
        })?;

        Ok(admin_model_to_domain(model))
    }

    async fn get_admin_by_username(&self, username: &str) -> DomainResult<Option<Admin>> {
        let model = admin::Entity::find()
            .filter(admin::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(model.map(admin_model_to_domain))
    }

    async fn get_admin_by_id(&self, id: &str) -> DomainResult<Option<Admin>> {
        let model = admin::Entity::find_by_id(id).one(&self.db).await?;

        Ok(model.map(admin_model_to_domain))
    }
}
