//! OpenAPI document for the service, served at `/api-docs/openapi.json`.

use utoipa::openapi::{info::ContactBuilder, server::ServerBuilder, OpenApi as OpenApiDoc};
use utoipa::OpenApi;

use crate::dto::{FieldViolation, TodoRepresentation};
use crate::error::ErrorResponse;
use crate::handlers;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const DEFAULT_CONTACT_NAME: &str = "Task Box Team";

/// Deployment-specific parts of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSettings {
    pub server_url: String,
    pub contact_name: String,
    pub contact_email: Option<String>,
}

impl Default for DocSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            contact_name: DEFAULT_CONTACT_NAME.to_string(),
            contact_email: None,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Task Box API",
        description = "REST API for managing tasks and to-do items",
        version = "1.0",
        contact(name = "Task Box Team")
    ),
    servers((url = "http://localhost:8080", description = "Local Development Server")),
    paths(
        handlers::list_todos,
        handlers::get_todo,
        handlers::create_todo,
        handlers::update_todo,
        handlers::delete_todo,
    ),
    components(schemas(TodoRepresentation, ErrorResponse, FieldViolation)),
    tags((name = "Todo", description = "Todo management APIs"))
)]
pub struct ApiDoc;

/// The generated document, advertising `settings.server_url` as its only
/// server and `settings` as its contact.
pub fn document(settings: &DocSettings) -> OpenApiDoc {
    let mut doc = ApiDoc::openapi();
    if settings.server_url != DEFAULT_SERVER_URL {
        doc.servers = Some(vec![ServerBuilder::new()
            .url(&settings.server_url)
            .description(Some("Configured server"))
            .build()]);
    }
    doc.info.contact = Some(
        ContactBuilder::new()
            .name(Some(&settings.contact_name))
            .email(settings.contact_email.as_deref())
            .build(),
    );
    doc
}
