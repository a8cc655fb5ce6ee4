use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation error: {0} is required")]
    Validation(&'static str),
    #[error("unknown entry kind: {0}")]
    UnknownKind(String),
}
