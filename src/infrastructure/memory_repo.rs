use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{error::TodoError, repository::TodoRepository, todo::Todo};

/// Title reserved for tests: creating a todo with it simulates a storage
/// failure.
pub const FAILING_TITLE: &str = "genError";

/// In-memory `TodoRepository` for exercising the HTTP layer without a
/// database. The map is shared across concurrent handlers, so every access
/// goes through the mutex.
#[derive(Clone, Default)]
pub struct MemoryTodoRepository {
    items: Arc<Mutex<HashMap<String, Todo>>>,
}

#[async_trait]
impl TodoRepository for MemoryTodoRepository {
    async fn get(&self, id: i64) -> Result<Todo, TodoError> {
        let items = self.items.lock().unwrap();
        items.get(&id.to_string()).cloned().ok_or(TodoError::NotFound)
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
        if todo.title == FAILING_TITLE {
            return Err(TodoError::Storage("error happen".into()));
        }

        // Predictable id so tests can assert on it; a caller-supplied id is
        // kept as-is for seeding fixtures.
        if todo.id.is_empty() {
            todo.id = format!("{}-{}", todo.title, todo.due_date);
        }
        self.items.lock().unwrap().insert(todo.id.clone(), todo.clone());
        Ok(())
    }
}
