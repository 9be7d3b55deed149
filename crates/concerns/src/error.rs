use core_types::CoreError;
use database::DbError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Concern not found with id: {0}")]
    NotFound(Uuid),

    #[error("Invalid concern: {0}")]
    InvalidInput(String),

    #[error("Store error: {0}")]
    Store(#[from] DbError),
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}
