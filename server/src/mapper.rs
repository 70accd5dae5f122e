//! Conversion between `TodoRepresentation` and the persisted `Todo`.
//!
//! Both directions copy fields verbatim. Validation has already run by the
//! time `to_entity` is called, so a missing title only reaches it in tests.

use crate::dto::TodoRepresentation;
use crate::model::Todo;

/// Build an unsaved record from an inbound representation. Never copies `id`.
pub fn to_entity(representation: TodoRepresentation) -> Todo {
    Todo {
        id: None,
        title: representation.title.unwrap_or_default(),
        description: representation.description,
        completed: representation.completed,
    }
}

/// Build an outbound representation from a stored record.
pub fn to_representation(todo: Todo) -> TodoRepresentation {
    TodoRepresentation {
        id: todo.id,
        title: Some(todo.title),
        description: todo.description,
        completed: todo.completed,
    }
}
