//! Persistence seam for todo records.
//!
//! # Design
//! `TodoRepository` exposes the four operations the service needs and nothing
//! more. Methods return boxed futures instead of using `async fn` so the
//! service can hold an `Arc<dyn TodoRepository>` and pick the backend at
//! startup.
//!
//! `save` inserts a record without an id and gives it a fresh one. A record
//! with an id only replaces an existing row; if that row is gone, `save`
//! fails with `RepositoryError::Missing` and stores nothing.

use std::{collections::BTreeMap, future::Future, pin::Pin};

use tokio::sync::RwLock;

use crate::error::RepositoryError;
use crate::model::{Todo, TodoId};

/// Boxed future returned by every repository method.
pub type RepoFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RepositoryError>> + Send + 'a>>;

/// Storage for `Todo` records.
pub trait TodoRepository: Send + Sync {
    /// All stored records, in an order chosen by the implementation.
    fn find_all(&self) -> RepoFuture<'_, Vec<Todo>>;

    /// The record with `id`, or `None`.
    fn find_by_id(&self, id: TodoId) -> RepoFuture<'_, Option<Todo>>;

    /// Insert a new `todo`, or replace the stored record with the same id, and
    /// return the stored record. Never recreates a deleted id.
    fn save(&self, todo: Todo) -> RepoFuture<'_, Todo>;

    /// Remove the record with `id`. Removing an absent id is not an error.
    fn delete_by_id(&self, id: TodoId) -> RepoFuture<'_, ()>;
}

#[derive(Debug)]
struct Table {
    next_id: TodoId,
    rows: BTreeMap<TodoId, Todo>,
}

/// Process-local repository. Ids start at 1 and `find_all` returns records in
/// ascending id order.
#[derive(Debug)]
pub struct InMemoryTodoRepository {
    table: RwLock<Table>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn find_all(&self) -> RepoFuture<'_, Vec<Todo>> {
        Box::pin(async move {
            let table = self.table.read().await;
            let todos: Vec<Todo> = table.rows.values().cloned().collect();
            Ok(todos)
        })
    }

    fn find_by_id(&self, id: TodoId) -> RepoFuture<'_, Option<Todo>> {
        Box::pin(async move { Ok(self.table.read().await.rows.get(&id).cloned()) })
    }

    fn save(&self, mut todo: Todo) -> RepoFuture<'_, Todo> {
        Box::pin(async move {
            let mut table = self.table.write().await;
            let id = match todo.id {
                Some(id) if table.rows.contains_key(&id) => id,
                Some(id) => return Err(RepositoryError::Missing { id }),
                None => {
                    let id = table.next_id;
                    table.next_id += 1;
                    id
                }
            };
            todo.id = Some(id);
            table.rows.insert(id, todo.clone());
            Ok::<_, RepositoryError>(todo)
        })
    }

    fn delete_by_id(&self, id: TodoId) -> RepoFuture<'_, ()> {
        Box::pin(async move {
            self.table.write().await.rows.remove(&id);
            Ok(())
        })
    }
}
