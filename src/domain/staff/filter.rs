use super::{Staff, StaffRelation, StaffRole, StaffSortField};
use crate::shared::{DomainResult, SortDirection, SortKey};

/// Exact-match conditions for staff queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffFilter {
    pub name: Option<String>,
    pub role: Option<StaffRole>,
    pub email: Option<String>,
}

impl StaffFilter {
    /// Emails are stored lower-cased, so the filter is too.
    pub fn new(name: Option<String>, role: Option<StaffRole>, email: Option<String>) -> Self {
        Self {
            name,
            role,
            email: email.map(|e| e.trim().to_lowercase()),
        }
    }

    pub fn matches(&self, staff: &Staff) -> bool {
        self.name.as_ref().map_or(true, |n| *n == staff.name)
            && self.role.map_or(true, |r| r == staff.role)
            && self.email.as_ref().map_or(true, |e| *e == staff.email)
    }
}

/// Resolve `sortBy` keys into staff columns, rejecting unknown fields.
pub fn resolve_sort(keys: &[SortKey]) -> DomainResult<Vec<(StaffSortField, SortDirection)>> {
    keys.iter()
        .map(|k| Ok((k.field.parse::<StaffSortField>()?, k.direction)))
        .collect()
}

/// Resolve `populate` entries into staff relations, rejecting unknown fields.
pub fn resolve_populate(fields: &[String]) -> DomainResult<Vec<StaffRelation>> {
    let mut relations = Vec::with_capacity(fields.len());
    for field in fields {
        let relation = field.parse::<StaffRelation>()?;
        if !relations.contains(&relation) {
            relations.push(relation);
        }
    }
    Ok(relations)
}
