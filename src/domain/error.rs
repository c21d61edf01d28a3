use crate::api::error::ApiError;

/// Error kinds surfaced by the domain services.
///
/// The first failing rule in a service call aborts it with one of these;
/// the API layer maps them onto HTTP statuses (404/400/403/409/500).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(msg) => ApiError::not_found(msg),
            DomainError::Validation(msg) => ApiError::bad_request(msg),
            DomainError::Forbidden(msg) => ApiError::forbidden(msg),
            DomainError::Conflict(msg) => ApiError::conflict(msg),
            DomainError::Database(err) => err.into(),
        }
    }
}
