use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Storage(_))
    }

    /// Message without the variant prefix, suitable for API clients.
    pub fn public_message(&self) -> String {
        match self {
            DomainError::NotFound { entity, .. } => format!("{} not found", entity),
            DomainError::Validation(msg)
            | DomainError::Conflict(msg)
            | DomainError::Unauthorized(msg)
            | DomainError::Forbidden(msg) => msg.clone(),
            DomainError::Storage(_) => "Internal server error".to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
