use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

use crate::middleware::error_handling::{describe_validation, AppError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    NotFound,
    Backend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn validation(message: impl Into<String>) -> Self {
        Self { kind: FailureKind::Validation, message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self { kind: FailureKind::NotFound, message: message.into() }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self { kind: FailureKind::Backend, message: message.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            FailureKind::Validation => StatusCode::BAD_REQUEST,
            FailureKind::NotFound => StatusCode::NOT_FOUND,
            FailureKind::Backend => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of a workflow call as seen by the caller. Workflow operations never
/// return `Err`; backend problems are logged and folded into `Failure`.
///
/// Serializes as `{"success": true, "data": ...}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(Failure),
}

impl<T> Outcome<T> {
    /// Folds a fallible call into an outcome. Internal errors are logged here
    /// and reported as `Failed to <context>`.
    pub fn from_result(result: Result<T, AppError>, context: &str) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(AppError::Validation(errors)) => Outcome::Failure(Failure::validation(format!(
                "Missing or invalid fields: {}",
                describe_validation(&errors)
            ))),
            Err(AppError::NotFound(msg)) => Outcome::Failure(Failure::not_found(msg)),
            Err(
                AppError::BadRequest(msg) | AppError::InvalidInput(msg) | AppError::Conflict(msg),
            ) => Outcome::Failure(Failure::validation(msg)),
            Err(err) => {
                tracing::error!("❌ Failed to {}: {:?}", context, err);
                Outcome::Failure(Failure::backend(format!("Failed to {}", context)))
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Success(data) => Some(data),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Outcome::Success(data) => Some(data),
            Outcome::Failure(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(data) => Outcome::Success(f(data)),
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Outcome", 2)?;
        match self {
            Outcome::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Outcome::Failure(failure) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", &failure.message)?;
            }
        }
        state.end()
    }
}

impl<T: Serialize> Outcome<T> {
    /// Response for a create call: 201 on success.
    pub fn created(self) -> Response {
        let status = match &self {
            Outcome::Success(_) => StatusCode::CREATED,
            Outcome::Failure(failure) => failure.status_code(),
        };
        (status, Json(self)).into_response()
    }
}

impl<T: Serialize> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        let status = match &self {
            Outcome::Success(_) => StatusCode::OK,
            Outcome::Failure(failure) => failure.status_code(),
        };
        (status, Json(self)).into_response()
    }
}
