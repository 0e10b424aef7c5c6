use serde::{Deserialize, Serialize};

/// A user todo item in its storage-agnostic shape.
///
/// `id` is empty until the store assigns one on create; `due_date` crosses
/// this boundary as text, with the storage layer owning the conversion to
/// and from its native temporal type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub due_date: String,
}
