use async_trait::async_trait;

use super::error::TodoError;
use super::todo::Todo;

/// Storage contract for todos, implemented by the SQL adapter and the
/// in-memory test double. Pure capability surface: no retry or caching.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Looks up a todo by its numeric id.
    async fn get(&self, id: i64) -> Result<Todo, TodoError>;

    /// Persists a new todo and writes the assigned id back into `todo`.
    async fn create(&self, todo: &mut Todo) -> Result<(), TodoError>;
}
