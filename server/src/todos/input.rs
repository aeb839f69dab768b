//! Request body schemas for the todo routes.
//!
//! # Design
//! Clients may send any JSON type for any field. Rather than letting the JSON
//! extractor reject a mistyped field wholesale, each field is captured as a
//! `Field<T>`: either the expected type or the raw value that was sent. The
//! service turns the latter into per-field validation reasons. Unknown keys
//! are dropped during deserialization, and `null` collapses to `None`.

use serde::Deserialize;
use serde_json::Value;

/// A field that was sent either with the expected type or with something
/// else.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Field<T> {
    Typed(T),
    Mistyped(Value),
}

impl Field<String> {
    /// Mirrors JavaScript truthiness so `false`, `0` and `""` count as absent.
    pub fn is_falsy(&self) -> bool {
        match self {
            Field::Typed(s) => s.is_empty(),
            Field::Mistyped(Value::Null) => true,
            Field::Mistyped(Value::Bool(b)) => !b,
            Field::Mistyped(Value::Number(n)) => n.as_f64() == Some(0.0),
            // strings always land in `Typed`
            Field::Mistyped(Value::String(_) | Value::Array(_) | Value::Object(_)) => false,
        }
    }
}

/// Body of `POST /todos`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CreateTodoInput {
    #[serde(default)]
    pub title: Option<Field<String>>,
}

/// Body of `PATCH /todos/{todoId}`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PatchTodoInput {
    #[serde(default)]
    pub title: Option<Field<String>>,
    #[serde(default)]
    pub completed: Option<Field<bool>>,
}
