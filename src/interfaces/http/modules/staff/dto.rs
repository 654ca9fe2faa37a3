//! Staff DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::domain::{Admin, CreateStaffDto, DomainResult, Reference, Staff, StaffFilter, StaffRole};
use crate::interfaces::http::modules::auth::AdminDto;
use crate::shared::QueryOptions;

/// `createdBy`: the admin id, or the admin itself when populated.
/// `null` when population found no such admin.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CreatedByDto {
    Id(String),
    Admin(AdminDto),
    Missing,
}

impl From<Reference<Admin>> for CreatedByDto {
    fn from(r: Reference<Admin>) -> Self {
        match r {
            Reference::Id(id) => CreatedByDto::Id(id),
            Reference::Populated(admin) => CreatedByDto::Admin(admin.into()),
            Reference::Missing(_) => CreatedByDto::Missing,
        }
    }
}

/// Staff API representation
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffDto {
    pub id: String,
    pub name: String,
    pub email: String,
    /// nurse, doctor, technician or admin
    pub role: String,
    pub shift_preferences: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<CreatedByDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Staff> for StaffDto {
    fn from(s: Staff) -> Self {
        Self {
            id: s.id,
            name: s.name,
            email: s.email,
            role: s.role.as_str().to_string(),
            shift_preferences: s.shift_preferences,
            created_by: s.created_by.map(CreatedByDto::from),
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    role.parse::<StaffRole>()
        .map(|_| ())
        .map_err(|_| {
            ValidationError::new("role")
                .with_message("must be one of nurse, doctor, technician, admin".into())
        })
}

/// Create staff request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(custom(function = "validate_role"))]
    pub role: String,
    #[serde(default)]
    pub shift_preferences: Vec<String>,
}

impl CreateStaffRequest {
    pub fn into_dto(self, created_by: Option<String>) -> DomainResult<CreateStaffDto> {
        Ok(CreateStaffDto {
            name: self.name,
            email: self.email,
            role: self.role.parse()?,
            shift_preferences: self.shift_preferences,
            created_by,
        })
    }
}

/// List staff query parameters
///
/// `limit` and `page` are taken as raw strings so that junk values fall
/// back to the defaults instead of failing the request.
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListStaffParams {
    /// Exact name match
    pub name: Option<String>,
    /// nurse, doctor, technician or admin
    #[validate(custom(function = "validate_role"))]
    pub role: Option<String>,
    /// Exact email match
    #[validate(email(message = "must be a valid email"))]
    pub email: Option<String>,
    /// `field:asc|desc`, comma separated, e.g. `role:asc,name:desc`
    pub sort_by: Option<String>,
    /// Page size (default 10)
    pub limit: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Comma separated relations to expand, e.g. `createdBy`
    pub populate: Option<String>,
}

impl ListStaffParams {
    pub fn into_query(self) -> DomainResult<(StaffFilter, QueryOptions)> {
        let role = self.role.as_deref().map(str::parse::<StaffRole>).transpose()?;
        let filter = StaffFilter::new(self.name, role, self.email);

        let options = QueryOptions {
            sort_by: self.sort_by,
            limit: QueryOptions::parse_number(self.limit.as_deref()),
            page: QueryOptions::parse_number(self.page.as_deref()),
            populate: self.populate,
        };

        Ok((filter, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn junk_paging_values_become_none() {
        let params = ListStaffParams {
            limit: Some("ten".into()),
            page: Some("2".into()),
            ..Default::default()
        };

        let (_, options) = params.into_query().unwrap();

        assert_eq!(options.limit, None);
        assert_eq!(options.page, Some(2));
    }

    #[test]
    fn role_filter_is_parsed() {
        let params = ListStaffParams {
            role: Some("doctor".into()),
            email: Some("A@X.IO".into()),
            ..Default::default()
        };

        let (filter, _) = params.into_query().unwrap();

        assert_eq!(filter.role, Some(StaffRole::Doctor));
        assert_eq!(filter.email.as_deref(), Some("a@x.io"));
    }

    #[test]
    fn unknown_role_fails_validation() {
        let request = CreateStaffRequest {
            name: "Amy".into(),
            email: "amy@x.io".into(),
            role: "janitor".into(),
            shift_preferences: vec![],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn populated_created_by_serializes_as_object() {
        let now = Utc::now();
        let admin = Admin {
            id: "a1".into(),
            username: "root".into(),
            password_hash: "secret-hash".into(),
            name: "Root".into(),
            created_at: now,
            updated_at: now,
        };
        let staff = Staff {
            id: "s1".into(),
            name: "Amy".into(),
            email: "amy@x.io".into(),
            role: StaffRole::Nurse,
            shift_preferences: vec!["night".into()],
            created_by: Some(Reference::Populated(admin)),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(StaffDto::from(staff)).unwrap();

        assert_eq!(json["shiftPreferences"][0], "night");
        assert_eq!(json["createdBy"]["username"], "root");
        assert!(json["createdBy"].get("passwordHash").is_none());
    }

    #[test]
    fn unresolved_created_by_serializes_as_null() {
        let now = Utc::now();
        let staff = Staff {
            id: "s1".into(),
            name: "Amy".into(),
            email: "amy@x.io".into(),
            role: StaffRole::Nurse,
            shift_preferences: vec![],
            created_by: Some(Reference::Missing("gone".into())),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(StaffDto::from(staff)).unwrap();

        assert!(json.as_object().unwrap().contains_key("createdBy"));
        assert!(json["createdBy"].is_null());
    }
}
