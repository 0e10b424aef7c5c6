use thiserror::Error;

/// Closed set of failures a repository can surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// Input rejected before any storage access.
    #[error("{0}")]
    Validation(String),
    /// No row matched the requested id.
    #[error("todo not found")]
    NotFound,
    /// Transport or query failure from the backing store.
    #[error("{0}")]
    Storage(String),
}
