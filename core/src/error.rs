//! Error types for the Task Box API client.
//!
//! # Design
//! `NotFound` and `Rejected` get dedicated variants because they are the two
//! failures the API documents (404 and 400). Any other unexpected status lands
//! in `HttpError` with the raw status and body.

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404: the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400: the payload failed validation or was malformed.
    #[error("request rejected: {body}")]
    Rejected { body: String },

    /// The server returned a status other than the expected one, 400 or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
