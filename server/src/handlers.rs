//! HTTP handlers for `/api/v1/todos`.
//!
//! Each handler converts between `TodoRepresentation` and `Todo` through the
//! mapper and leaves every decision to `TodoService`. Validation has already
//! happened in `ValidatedJson` by the time a handler body runs.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::dto::TodoRepresentation;
use crate::error::{ErrorResponse, TodoError};
use crate::extract::ValidatedJson;
use crate::mapper::{to_entity, to_representation};
use crate::model::TodoId;
use crate::AppState;

/// Get all todos
///
/// Retrieves a list of all todo items.
#[utoipa::path(
    get,
    path = "/api/v1/todos",
    tag = "Todo",
    responses(
        (status = 200, description = "Successfully retrieved all todos", body = Vec<TodoRepresentation>),
    )
)]
pub async fn list_todos(
    State(state): State<AppState>,
) -> Result<Json<Vec<TodoRepresentation>>, TodoError> {
    let todos = state.service.get_all_todos().await?;
    Ok(Json(todos.into_iter().map(to_representation).collect()))
}

/// Get a todo by ID
///
/// Retrieves a specific todo item by its ID.
#[utoipa::path(
    get,
    path = "/api/v1/todos/{id}",
    tag = "Todo",
    params(("id" = i64, Path, description = "ID of the todo to retrieve")),
    responses(
        (status = 200, description = "Todo found", body = TodoRepresentation),
        (status = 404, description = "Todo not found", body = ErrorResponse),
    )
)]
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Json<TodoRepresentation>, TodoError> {
    let todo = state.service.get_todo_by_id(id).await?;
    Ok(Json(to_representation(todo)))
}

/// Create a new todo
///
/// Creates a new todo item.
#[utoipa::path(
    post,
    path = "/api/v1/todos",
    tag = "Todo",
    request_body(content = TodoRepresentation, description = "Todo to create"),
    responses(
        (status = 201, description = "Todo created successfully", body = TodoRepresentation),
        (status = 400, description = "Invalid input", body = ErrorResponse),
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<TodoRepresentation>,
) -> Result<(StatusCode, Json<TodoRepresentation>), TodoError> {
    let created = state.service.create_todo(to_entity(input)).await?;
    Ok((StatusCode::CREATED, Json(to_representation(created))))
}

/// Update a todo
///
/// Replaces the title, description and completion flag of an existing todo.
#[utoipa::path(
    put,
    path = "/api/v1/todos/{id}",
    tag = "Todo",
    params(("id" = i64, Path, description = "ID of the todo to update")),
    request_body(content = TodoRepresentation, description = "Updated todo details"),
    responses(
        (status = 200, description = "Todo updated successfully", body = TodoRepresentation),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
    )
)]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
    ValidatedJson(input): ValidatedJson<TodoRepresentation>,
) -> Result<Json<TodoRepresentation>, TodoError> {
    let updated = state.service.update_todo(id, to_entity(input)).await?;
    Ok(Json(to_representation(updated)))
}

/// Delete a todo
///
/// Deletes a todo item by ID.
#[utoipa::path(
    delete,
    path = "/api/v1/todos/{id}",
    tag = "Todo",
    params(("id" = i64, Path, description = "ID of the todo to delete")),
    responses(
        (status = 204, description = "Todo deleted successfully"),
        (status = 404, description = "Todo not found", body = ErrorResponse),
    )
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<StatusCode, TodoError> {
    state.service.delete_todo(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Liveness check. Does not touch the repository.
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

pub async fn openapi_json(
    State(state): State<AppState>,
) -> Json<utoipa::openapi::OpenApi> {
    Json(state.api_doc.as_ref().clone())
}
