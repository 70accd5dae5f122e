//! The persisted todo record.
//!
//! # Design
//! `Todo` is the shape the repository stores. It carries no validation or
//! serialization concerns; those live on `TodoRepresentation` in `dto`.
//! The `id` is `None` until the repository assigns one on first save.

/// Identifier assigned by the repository.
pub type TodoId = i64;

/// A todo item as stored by a `TodoRepository`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Todo {
    pub id: Option<TodoId>,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl Todo {
    /// A record that has not been saved yet.
    pub fn new(title: impl Into<String>, description: Option<String>, completed: bool) -> Self {
        Self {
            id: None,
            title: title.into(),
            description,
            completed,
        }
    }

    /// Copy the mutable fields of `other` onto `self`, keeping `self.id`.
    pub fn replace_fields(&mut self, other: Todo) {
        self.title = other.title;
        self.description = other.description;
        self.completed = other.completed;
    }
}
