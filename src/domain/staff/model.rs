use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::admin::Admin;
use crate::shared::DomainError;

/// Staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StaffRole {
    Nurse,
    Doctor,
    Technician,
    Admin,
}

impl StaffRole {
    pub const ALL: [StaffRole; 4] = [
        StaffRole::Nurse,
        StaffRole::Doctor,
        StaffRole::Technician,
        StaffRole::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Nurse => "nurse",
            StaffRole::Doctor => "doctor",
            StaffRole::Technician => "technician",
            StaffRole::Admin => "admin",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nurse" => Ok(StaffRole::Nurse),
            "doctor" => Ok(StaffRole::Doctor),
            "technician" => Ok(StaffRole::Technician),
            "admin" => Ok(StaffRole::Admin),
            other => Err(DomainError::Validation(format!(
                "role must be one of nurse, doctor, technician, admin (got '{}')",
                other
            ))),
        }
    }
}

/// A reference to another document: either the bare id or, once
/// populated, the referenced document itself. Populating an id whose
/// document no longer exists yields `Missing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference<T> {
    Id(String),
    Populated(T),
    Missing(String),
}

impl Reference<Admin> {
    pub fn id(&self) -> &str {
        match self {
            Reference::Id(id) | Reference::Missing(id) => id,
            Reference::Populated(admin) => &admin.id,
        }
    }

    /// Resolve the reference against a lookup, keeping the id when the
    /// lookup finds nothing.
    pub fn resolve(self, lookup: impl FnOnce(&str) -> Option<Admin>) -> Self {
        match self {
            Reference::Id(id) | Reference::Missing(id) => match lookup(&id) {
                Some(admin) => Reference::Populated(admin),
                None => Reference::Missing(id),
            },
            populated => populated,
        }
    }
}

/// Staff member
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Staff {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
    pub shift_preferences: Vec<String>,
    pub created_by: Option<Reference<Admin>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a staff page can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffSortField {
    Name,
    Email,
    Role,
    CreatedAt,
    UpdatedAt,
}

impl FromStr for StaffSortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(StaffSortField::Name),
            "email" => Ok(StaffSortField::Email),
            "role" => Ok(StaffSortField::Role),
            "createdAt" | "created_at" => Ok(StaffSortField::CreatedAt),
            "updatedAt" | "updated_at" => Ok(StaffSortField::UpdatedAt),
            other => Err(DomainError::Validation(format!(
                "Cannot sort staff by '{}'",
                other
            ))),
        }
    }
}

/// Relations of a staff document that can be populated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffRelation {
    CreatedBy,
}

impl FromStr for StaffRelation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdBy" | "created_by" => Ok(StaffRelation::CreatedBy),
            other => Err(DomainError::Validation(format!(
                "Cannot populate staff field '{}'",
                other
            ))),
        }
    }
}
