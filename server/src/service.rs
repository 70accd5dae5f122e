//! Todo business operations over a `TodoRepository`.
//!
//! # Design
//! The service is the only caller of the repository. It owns the two policy
//! decisions in the system: a missing id is `TodoError::NotFound`, and an
//! update replaces every mutable field while keeping the stored id. A record
//! deleted between the lookup and the save of an update stays deleted and the
//! update reports `NotFound`.

use std::sync::Arc;

use crate::error::TodoError;
use crate::model::{Todo, TodoId};
use crate::repository::TodoRepository;

#[derive(Clone)]
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all_todos(&self) -> Result<Vec<Todo>, TodoError> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn get_todo_by_id(&self, id: TodoId) -> Result<Todo, TodoError> {
        match self.repository.find_by_id(id).await? {
            Some(todo) => Ok(todo),
            None => {
                tracing::debug!(id, "todo not found");
                Err(TodoError::NotFound { id })
            }
        }
    }

    pub async fn create_todo(&self, mut todo: Todo) -> Result<Todo, TodoError> {
        todo.id = None;
        let created = self.repository.save(todo).await?;
        tracing::info!(id = ?created.id, "todo created");
        Ok(created)
    }

    pub async fn update_todo(&self, id: TodoId, todo: Todo) -> Result<Todo, TodoError> {
        let mut existing = self.get_todo_by_id(id).await?;
        existing.replace_fields(todo);
        let updated = self.repository.save(existing).await?;
        tracing::info!(id, completed = updated.completed, "todo updated");
        Ok(updated)
    }

    pub async fn delete_todo(&self, id: TodoId) -> Result<(), TodoError> {
        self.get_todo_by_id(id).await?;
        self.repository.delete_by_id(id).await?;
        tracing::info!(id, "todo deleted");
        Ok(())
    }
}

impl std::fmt::Debug for TodoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoService").finish_non_exhaustive()
    }
}
