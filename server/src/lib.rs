//! Task Box todo service: an axum REST API over a pluggable todo repository.
//!
//! # Overview
//! `app` builds the router; `run` serves it on a bound listener until a
//! shutdown future resolves. Request flow is handler → mapper → service →
//! repository and back.
//!
//! # Design
//! - `AppState` carries the `TodoService` and the prebuilt OpenAPI document;
//!   handlers receive it through axum `State`.
//! - The repository is chosen at startup (`InMemoryTodoRepository` or
//!   `PostgresTodoRepository`) and hidden behind `Arc<dyn TodoRepository>`.
//! - Every request gets an `x-request-id` which is echoed on the response and
//!   recorded on its tracing span.

pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod mapper;
pub mod model;
pub mod openapi;
pub mod postgres;
pub mod repository;
pub mod service;

use std::{future::Future, sync::Arc};

use axum::{
    extract::Request,
    http::HeaderValue,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

pub use dto::TodoRepresentation;
pub use error::{ErrorResponse, RepositoryError, TodoError};
pub use model::{Todo, TodoId};
pub use repository::{InMemoryTodoRepository, TodoRepository};
pub use service::TodoService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: TodoService,
    pub api_doc: Arc<utoipa::openapi::OpenApi>,
}

impl AppState {
    pub fn new(repository: Arc<dyn TodoRepository>, docs: &openapi::DocSettings) -> Self {
        Self {
            service: TodoService::new(repository),
            api_doc: Arc::new(openapi::document(docs)),
        }
    }

    /// State backed by a fresh `InMemoryTodoRepository`.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryTodoRepository::new()),
            &openapi::DocSettings::default(),
        )
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let value = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(value))
    }
}

pub fn app(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            request_id,
        )
    });

    Router::new()
        .route(
            "/api/v1/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/api/v1/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .route("/api-docs/openapi.json", get(handlers::openapi_json))
        .route("/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(trace)
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

/// Serve `app(state)` on `listener` until `shutdown` resolves.
pub async fn run(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await
}
