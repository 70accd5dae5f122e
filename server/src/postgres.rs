//! PostgreSQL-backed `TodoRepository`.
//!
//! Uses runtime-checked `sqlx::query_as` so the crate builds without a live
//! database. `ensure_schema` creates the `todos` table if it is missing.

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::error::RepositoryError;
use crate::model::{Todo, TodoId};
use crate::repository::{RepoFuture, TodoRepository};

#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    description: Option<String>,
    completed: bool,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: Some(row.id),
            title: row.title,
            description: row.description,
            completed: row.completed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `url`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if no connection can be established.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Create the `todos` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the DDL fails.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS todos (
                id          BIGSERIAL PRIMARY KEY,
                title       TEXT NOT NULL,
                description TEXT,
                completed   BOOLEAN NOT NULL DEFAULT FALSE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        tracing::debug!("todos table ready");
        Ok(())
    }
}

impl TodoRepository for PostgresTodoRepository {
    fn find_all(&self) -> RepoFuture<'_, Vec<Todo>> {
        Box::pin(async move {
            let rows = sqlx::query_as::<_, TodoRow>(
                "SELECT id, title, description, completed FROM todos ORDER BY id",
            )
            .fetch_all(&self.pool)
            .await?;
            let todos: Vec<Todo> = rows.into_iter().map(Todo::from).collect();
            Ok::<_, RepositoryError>(todos)
        })
    }

    fn find_by_id(&self, id: TodoId) -> RepoFuture<'_, Option<Todo>> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, TodoRow>(
                "SELECT id, title, description, completed FROM todos WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            Ok::<_, RepositoryError>(row.map(Todo::from))
        })
    }

    fn save(&self, todo: Todo) -> RepoFuture<'_, Todo> {
        Box::pin(async move {
            let row = match todo.id {
                None => {
                    sqlx::query_as::<_, TodoRow>(
                        r"
                        INSERT INTO todos (title, description, completed)
                        VALUES ($1, $2, $3)
                        RETURNING id, title, description, completed
                        ",
                    )
                    .bind(&todo.title)
                    .bind(&todo.description)
                    .bind(todo.completed)
                    .fetch_one(&self.pool)
                    .await?
                }
                Some(id) => {
                    sqlx::query_as::<_, TodoRow>(
                        r"
                        UPDATE todos
                        SET title = $2, description = $3, completed = $4
                        WHERE id = $1
                        RETURNING id, title, description, completed
                        ",
                    )
                    .bind(id)
                    .bind(&todo.title)
                    .bind(&todo.description)
                    .bind(todo.completed)
                    .fetch_optional(&self.pool)
                    .await?
                    .ok_or(RepositoryError::Missing { id })?
                }
            };
            Ok::<_, RepositoryError>(Todo::from(row))
        })
    }

    fn delete_by_id(&self, id: TodoId) -> RepoFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("DELETE FROM todos WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
            Ok::<_, RepositoryError>(())
        })
    }
}
