//! Synchronous client core for the Task Box todo API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network. The caller executes the round-trip, which keeps the
//! core deterministic and easy to embed behind any HTTP stack.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only the collection URL.
//! - Each operation is a `build_*` / `parse_*` pair.
//! - `TodoInput` is a full replacement payload, matching the server's PUT
//!   semantics.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Todo, TodoInput};
