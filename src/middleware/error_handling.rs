// ============================================================================
// Error Handling - JSON error responses
// ============================================================================
//
// Internal failures (database, storage, unexpected) are logged server-side
// with full detail and surface to clients as a generic message. Client
// errors (validation, not found, conflict) carry developer-controlled text.
//
// Response body: `{"error": "<message>", "status": <code>}`
//
// ============================================================================

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::services::storage_client::StorageError;
use crate::services::upload_service::{ImageResolveError, UploadError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] JsonRejection),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                // Only slugs carry unique constraints in this schema.
                return AppError::Conflict("A record with this slug already exists".to_string());
            }
            if db_err.is_foreign_key_violation() {
                return AppError::BadRequest("Referenced record does not exist".to_string());
            }
        }
        AppError::Database(err)
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::InvalidFileType(_) => AppError::BadRequest(err.to_string()),
            UploadError::Storage(storage) => AppError::Storage(storage),
        }
    }
}

impl From<ImageResolveError> for AppError {
    fn from(err: ImageResolveError) -> Self {
        match err {
            ImageResolveError::Missing => AppError::BadRequest(err.to_string()),
            ImageResolveError::Upload(upload) => upload.into(),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Storage(_) => StatusCode::BAD_GATEWAY,
            AppError::Validation(_)
            | AppError::Json(_)
            | AppError::BadRequest(_)
            | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    /// Message safe to hand back to a client. Internal details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Internal(_) => "Internal server error".to_string(),
            AppError::Storage(_) => "Storage service error".to_string(),
            AppError::Validation(errors) => format!("Validation failed: {}", describe_validation(errors)),
            AppError::Json(_) => "Invalid JSON".to_string(),
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::InvalidInput(msg) => msg.clone(),
            AppError::Unauthorized => "Unauthorized".to_string(),
        }
    }
}

/// Comma-separated list of the fields that failed validation, sorted for stable output
pub fn describe_validation(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    fields.join(", ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(err) => tracing::error!("Database error: {:?}", err),
            AppError::Storage(err) => tracing::error!("Storage error: {:?}", err),
            AppError::Internal(err) => tracing::error!("Internal error: {:?}", err),
            _ => {}
        }

        let status = self.status_code();
        let body = Json(json!({
            "error": self.client_message(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
