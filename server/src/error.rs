//! Error types for the todo service and their HTTP mapping.
//!
//! # Design
//! `TodoError` is the single error type handlers return. Each variant maps to
//! exactly one status code in `IntoResponse`. Repository failures become a
//! generic 500; their detail is logged but never sent to the client.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::dto::{violations, FieldViolation};
use crate::model::TodoId;

/// Failures raised by a `TodoRepository` implementation.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// `save` was given an id that is no longer stored.
    #[error("todo with id {id} is not stored")]
    Missing { id: TodoId },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The backend could not be reached, for stores not built on sqlx.
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the service and the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    /// The inbound representation broke one or more field constraints.
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),

    /// The request body was not valid JSON for the expected shape.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// No todo exists with the requested id.
    #[error("todo with id {id} not found")]
    NotFound { id: TodoId },

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for TodoError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Missing { id } => TodoError::NotFound { id },
            other => TodoError::Repository(other),
        }
    }
}

impl From<ValidationErrors> for TodoError {
    fn from(errors: ValidationErrors) -> Self {
        TodoError::Validation(violations(&errors))
    }
}

impl From<JsonRejection> for TodoError {
    fn from(rejection: JsonRejection) -> Self {
        TodoError::MalformedBody(rejection.body_text())
    }
}

impl TodoError {
    pub fn status(&self) -> StatusCode {
        match self {
            TodoError::Validation(_) | TodoError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            TodoError::NotFound { .. } => StatusCode::NOT_FOUND,
            TodoError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TodoError::Validation(_) => "VALIDATION_ERROR",
            TodoError::MalformedBody(_) => "BAD_REQUEST",
            TodoError::NotFound { .. } => "NOT_FOUND",
            TodoError::Repository(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

/// JSON body returned for every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code().to_string();

        let body = match self {
            TodoError::Repository(source) => {
                tracing::error!(error = %source, "repository failure");
                ErrorResponse {
                    code,
                    message: "An internal error occurred".to_string(),
                    violations: Vec::new(),
                }
            }
            TodoError::Validation(violations) => ErrorResponse {
                code,
                message: "validation failed".to_string(),
                violations,
            },
            other => ErrorResponse {
                code,
                message: other.to_string(),
                violations: Vec::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}
