use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid username or password")]
    AuthenticationFailed,
    #[error("user already exists")]
    DuplicateUsername,
    #[error("{0} is required")]
    MissingRequiredField(&'static str),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("corrupt data file: {0}")]
    Corrupt(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::AuthenticationFailed => 1001,
            ServiceError::DuplicateUsername => 1002,
            ServiceError::MissingRequiredField(_) => 1003,
            ServiceError::Validation(_) => 1004,
            ServiceError::NotFound(_) => 1005,
            ServiceError::Storage(_) => 1200,
            ServiceError::Corrupt(_) => 1201,
        }
    }

    /// Whether the caller can show the error as a message and carry on.
    /// Storage failures are not recoverable at this layer.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ServiceError::Storage(_) | ServiceError::Corrupt(_))
    }
}

impl From<ModelError> for ServiceError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(field) => ServiceError::MissingRequiredField(field),
            ModelError::UnknownKind(_) => ServiceError::Validation(err.to_string()),
        }
    }
}
