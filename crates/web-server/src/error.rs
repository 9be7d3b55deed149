use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use concerns::ServiceError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(id) => AppError::NotFound(format!("concern {id}")),
            ServiceError::InvalidInput(reason) => AppError::InvalidInput(reason),
            ServiceError::Store(db_err) => AppError::Database(db_err),
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Not-found and invalid-input responses carry no body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(what) => {
                tracing::debug!(%what, "Responding 404.");
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::InvalidInput(reason) => {
                tracing::debug!(%reason, "Responding 400.");
                StatusCode::BAD_REQUEST.into_response()
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                let body = Json(json!({ "error": "An internal database error occurred" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
