//! Client-side DTOs for the Task Box API.
//!
//! # Design
//! Defined independently of the server crate so the client carries no axum,
//! sqlx or validation dependencies. The live integration test catches schema
//! drift between the two.

use serde::{Deserialize, Serialize};

/// A todo as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Payload for create and update. An update replaces every field, so a
/// `None` description clears the stored one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoInput {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl TodoInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

impl From<Todo> for TodoInput {
    fn from(todo: Todo) -> Self {
        Self {
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
        }
    }
}
