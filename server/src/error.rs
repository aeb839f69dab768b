//! Error taxonomy for the todo service and its HTTP rendering.
//!
//! # Design
//! `TodoError` is a closed enum. The service layer raises it, handlers pass
//! it through with `?`, and `IntoResponse` turns it into a status code and
//! JSON body exactly once, at the edge of the router.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::store::StoreError;

/// Resource name reported for missing todos.
pub const TODO_RESOURCE: &str = "Todo";

/// Field name to human-readable reason, serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InvalidFields(BTreeMap<String, String>);

impl InvalidFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, reason: &str) {
        self.0.insert(field.to_string(), reason.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when nothing was recorded, otherwise a validation error.
    pub fn into_result(self) -> Result<(), TodoError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(TodoError::Validation(self))
        }
    }
}

impl std::fmt::Display for InvalidFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, reason) in &self.0 {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{field} {reason}")?;
            first = false;
        }
        Ok(())
    }
}

/// Errors surfaced by `TodoService` operations.
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    /// Input failed validation; nothing was written.
    #[error("validation failed: {0}")]
    Validation(InvalidFields),

    /// The referenced resource does not exist or its id is malformed.
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// The document store failed.
    #[error(transparent)]
    Other(#[from] StoreError),
}

impl TodoError {
    pub fn validation(field: &str, reason: &str) -> Self {
        let mut fields = InvalidFields::new();
        fields.insert(field, reason);
        Self::Validation(fields)
    }

    pub fn todo_not_found() -> Self {
        Self::NotFound {
            resource: TODO_RESOURCE,
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            TodoError::Validation(invalid_fields) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": {
                        "name": "ValidationError",
                        "invalidFields": invalid_fields,
                    }
                }),
            ),
            TodoError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": {
                        "name": "ResourceNotFoundError",
                        "resource": resource,
                    }
                }),
            ),
            TodoError::Other(err) => {
                tracing::error!(error = %err, "unhandled store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": { "name": "InternalServerError" } }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
