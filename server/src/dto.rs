//! Wire-level representation of a todo.
//!
//! # Design
//! `TodoRepresentation` is what clients send and receive. `title` is an
//! `Option` so that a missing title deserializes cleanly and is reported as a
//! validation failure (400) rather than a JSON rejection. An inbound `id` is
//! accepted but never trusted: creation ignores it and updates take the id
//! from the path.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::model::TodoId;

/// Minimum title length, counted in characters after trimming whitespace.
pub const TITLE_MIN_LEN: usize = 3;

/// Data transfer object for todo operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct TodoRepresentation {
    /// Identifier assigned by the server. Ignored on input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(read_only, example = 1)]
    pub id: Option<TodoId>,

    /// Title of the todo item.
    #[validate(
        required(message = "Title is mandatory"),
        custom(function = "validate_title")
    )]
    #[schema(example = "Finish the quarterly report", min_length = 3)]
    pub title: Option<String>,

    /// Detailed description of the todo item.
    #[serde(default)]
    #[schema(example = "Include the revenue breakdown per region")]
    pub description: Option<String>,

    /// Completion status of the todo item.
    #[serde(default)]
    #[schema(example = false, default = false)]
    pub completed: bool,
}

impl TodoRepresentation {
    pub fn new(title: impl Into<String>, description: Option<String>, completed: bool) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            description,
            completed,
        }
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("Title is mandatory")));
    }
    if trimmed.chars().count() < TITLE_MIN_LEN {
        let mut err = ValidationError::new("length")
            .with_message(Cow::Borrowed("Title should be at least 3 characters long"));
        err.add_param(Cow::Borrowed("min"), &TITLE_MIN_LEN);
        return Err(err);
    }
    Ok(())
}

/// One failed constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Flatten `validator` errors into a stable, field-sorted list.
pub fn violations(errors: &validator::ValidationErrors) -> Vec<FieldViolation> {
    let mut out: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |err| FieldViolation {
                field: field.clone(),
                message: err
                    .message
                    .as_ref()
                    .map_or_else(|| err.code.to_string(), ToString::to_string),
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    out
}
