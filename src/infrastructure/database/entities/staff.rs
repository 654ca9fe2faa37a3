//! Staff entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum StaffRole {
    #[sea_orm(string_value = "nurse")]
    Nurse,
    #[sea_orm(string_value = "doctor")]
    Doctor,
    #[sea_orm(string_value = "technician")]
    Technician,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// Staff model
///
/// `seq` is the insertion sequence and gives the collection its natural
/// order; `id` is the public identifier.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub seq: i32,
    #[sea_orm(unique)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: StaffRole,
    #[sea_orm(column_type = "Text")]
    pub shift_preferences: String, // JSON array of shift names
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::admin::Entity",
        from = "Column::CreatedBy",
        to = "super::admin::Column::Id"
    )]
    Admin,
}

impl Related<super::admin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Admin.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
