//! DTOs for the todoman HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A todo as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /todos`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTodo {
    pub title: String,
}

/// Payload for `PATCH /todos/{id}`. Omitted fields stay unchanged on the
/// server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatchTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TodosEnvelope {
    pub todos: Vec<Todo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TodoEnvelope {
    pub todo: Todo,
}
