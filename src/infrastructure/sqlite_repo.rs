use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::domain::{error::TodoError, repository::TodoRepository, todo::Todo};

/// `TodoRepository` backed by the SQLite `todo` table.
#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> Result<Self, TodoError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(storage)?;
        Ok(Self { pool })
    }

    /// Creates the `todo` table if it does not exist yet.
    pub async fn init(&self) -> Result<(), TodoError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todo (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                due_date DATETIME NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn get(&self, id: i64) -> Result<Todo, TodoError> {
        if id <= 0 {
            return Err(TodoError::Validation("invalid todo id".into()));
        }

        let row = sqlx::query("SELECT id, title, due_date FROM todo WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;

        match row {
            Some(row) => row_to_todo(&row),
            None => Err(TodoError::NotFound),
        }
    }

    async fn create(&self, todo: &mut Todo) -> Result<(), TodoError> {
        if todo.title.is_empty() {
            return Err(TodoError::Validation(
                "cannot create todo without title".into(),
            ));
        }
        if todo.due_date.is_empty() {
            return Err(TodoError::Validation(
                "cannot create todo without due date".into(),
            ));
        }
        let due_date = DateTime::parse_from_rfc3339(&todo.due_date)
            .map_err(|e| TodoError::Validation(format!("invalid due date: {e}")))?
            .with_timezone(&Utc);

        let result = sqlx::query("INSERT INTO todo (title, due_date) VALUES (?1, ?2)")
            .bind(&todo.title)
            .bind(due_date)
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        todo.id = result.last_insert_rowid().to_string();
        Ok(())
    }
}

fn storage(err: sqlx::Error) -> TodoError {
    TodoError::Storage(err.to_string())
}

// The numeric id and the native datetime stay confined to this layer; the
// domain shape carries both as text.
fn row_to_todo(row: &SqliteRow) -> Result<Todo, TodoError> {
    let id: i64 = row.try_get("id").map_err(storage)?;
    let title: String = row.try_get("title").map_err(storage)?;
    let due_date: DateTime<Utc> = row.try_get("due_date").map_err(storage)?;
    Ok(Todo {
        id: id.to_string(),
        title,
        due_date: due_date.to_rfc3339(),
    })
}
