use std::sync::Arc;

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;

use super::input::{CreateTodoInput, Field, PatchTodoInput};
use super::model::{now, NewTodo, Todo, TodoChanges};
use crate::error::{InvalidFields, TodoError};
use crate::store::TodoStore;

/// Validates todo input and runs one store operation per call.
///
/// Holds no state besides the injected store, so clones are cheap and every
/// handler can own one.
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub async fn list_todos(&self) -> Result<Vec<Todo>, TodoError> {
        Ok(self.store.list().await?)
    }

    pub async fn create_todo(&self, input: CreateTodoInput) -> Result<Todo, TodoError> {
        let title = validate_create_title(input.title)?;
        let at = now();
        let todo = self
            .store
            .insert(NewTodo {
                title,
                completed: false,
                created_at: at,
                updated_at: at,
            })
            .await?;
        tracing::debug!(id = %todo.id, "created todo");
        Ok(todo)
    }

    pub async fn patch_todo(&self, todo_id: &str, input: PatchTodoInput) -> Result<Todo, TodoError> {
        let id = ObjectId::parse_str(todo_id).map_err(|_| TodoError::todo_not_found())?;
        let changes = validate_patch(input, now())?;

        let todo = self
            .store
            .update(id, changes)
            .await?
            .ok_or_else(TodoError::todo_not_found)?;
        tracing::debug!(%id, "patched todo");
        Ok(todo)
    }
}

fn validate_create_title(title: Option<Field<String>>) -> Result<String, TodoError> {
    let title = match title {
        None => return Err(TodoError::validation("title", "required")),
        Some(field) if field.is_falsy() => return Err(TodoError::validation("title", "required")),
        Some(Field::Mistyped(_)) => return Err(TodoError::validation("title", "must be a string")),
        Some(Field::Typed(title)) => title.trim().to_string(),
    };
    if title.is_empty() {
        return Err(TodoError::validation("title", "required"));
    }
    Ok(title)
}

/// Collects every field error before failing.
fn validate_patch(input: PatchTodoInput, updated_at: DateTime<Utc>) -> Result<TodoChanges, TodoError> {
    let mut invalid = InvalidFields::new();

    let title = match input.title {
        None => None,
        Some(Field::Mistyped(_)) => {
            invalid.insert("title", "must be a string");
            None
        }
        Some(Field::Typed(title)) => {
            let title = title.trim();
            if title.is_empty() {
                invalid.insert("title", "cannot be an empty string");
            }
            Some(title.to_string())
        }
    };

    let completed = match input.completed {
        None => None,
        Some(Field::Mistyped(_)) => {
            invalid.insert("completed", "must be a boolean");
            None
        }
        Some(Field::Typed(completed)) => Some(completed),
    };

    invalid.into_result()?;
    Ok(TodoChanges {
        title,
        completed,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn service() -> TodoService {
        TodoService::new(Arc::new(MemoryStore::new()))
    }

    fn create_input(body: serde_json::Value) -> CreateTodoInput {
        serde_json::from_value(body).unwrap()
    }

    fn patch_input(body: serde_json::Value) -> PatchTodoInput {
        serde_json::from_value(body).unwrap()
    }

    fn invalid_fields(err: TodoError) -> InvalidFields {
        match err {
            TodoError::Validation(fields) => fields,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_sets_defaults() {
        let todo = service().create_todo(create_input(json!({"title": "My Test Todo"}))).await.unwrap();
        assert_eq!(todo.title, "My Test Todo");
        assert!(!todo.completed);
        assert_eq!(todo.created_at, todo.updated_at);
    }

    #[tokio::test]
    async fn create_trims_title() {
        let todo = service().create_todo(create_input(json!({"title": "  My Test Todo "}))).await.unwrap();
        assert_eq!(todo.title, "My Test Todo");
    }

    #[tokio::test]
    async fn create_requires_title() {
        let svc = service();
        let bodies = [
            json!({}),
            json!({"title": null}),
            json!({"title": ""}),
            json!({"title": "   "}),
            json!({"title": 0}),
            json!({"title": false}),
        ];
        for body in bodies {
            let err = svc.create_todo(create_input(body.clone())).await.unwrap_err();
            assert_eq!(invalid_fields(err).get("title"), Some("required"), "{body}");
        }
        assert!(svc.list_todos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_non_string_title() {
        let svc = service();
        for body in [json!({"title": 123}), json!({"title": true}), json!({"title": ["a"]})] {
            let err = svc.create_todo(create_input(body.clone())).await.unwrap_err();
            assert_eq!(invalid_fields(err).get("title"), Some("must be a string"), "{body}");
        }
    }

    #[tokio::test]
    async fn list_returns_todos_in_creation_order() {
        let svc = service();
        for title in ["Todo 1", "Todo 2", "Todo 3"] {
            svc.create_todo(create_input(json!({ "title": title }))).await.unwrap();
        }
        let titles: Vec<_> = svc.list_todos().await.unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["Todo 1", "Todo 2", "Todo 3"]);
    }

    #[tokio::test]
    async fn patch_right_after_create_is_strictly_newer() {
        let svc = service();
        for _ in 0..200 {
            let todo = svc.create_todo(create_input(json!({"title": "My Todo"}))).await.unwrap();
            let patched = svc
                .patch_todo(&todo.id.to_hex(), patch_input(json!({"completed": true})))
                .await
                .unwrap();
            assert!(patched.updated_at > patched.created_at, "{patched:?}");
        }
    }

    #[tokio::test]
    async fn patch_malformed_id_is_not_found() {
        let err = service().patch_todo("1", patch_input(json!({"completed": true}))).await.unwrap_err();
        assert!(matches!(err, TodoError::NotFound { resource: "Todo" }));
    }

    #[tokio::test]
    async fn patch_malformed_id_wins_over_bad_body() {
        let err = service().patch_todo("1", patch_input(json!({"title": 1}))).await.unwrap_err();
        assert!(matches!(err, TodoError::NotFound { .. }));
    }

    #[tokio::test]
    async fn patch_unknown_id_is_not_found() {
        let err = service()
            .patch_todo("5b72ecfdbf16f1384b053639", patch_input(json!({"completed": true})))
            .await
            .unwrap_err();
        assert!(matches!(err, TodoError::NotFound { resource: "Todo" }));
    }

    #[tokio::test]
    async fn patch_reports_every_invalid_field() {
        let svc = service();
        let todo = svc.create_todo(create_input(json!({"title": "My Todo"}))).await.unwrap();
        let err = svc
            .patch_todo(&todo.id.to_hex(), patch_input(json!({"title": 123, "completed": "true"})))
            .await
            .unwrap_err();
        let mut expected = InvalidFields::new();
        expected.insert("title", "must be a string");
        expected.insert("completed", "must be a boolean");
        assert_eq!(invalid_fields(err), expected);
    }

    #[tokio::test]
    async fn patch_rejects_empty_title() {
        let svc = service();
        let todo = svc.create_todo(create_input(json!({"title": "My Todo"}))).await.unwrap();
        for title in ["", "   "] {
            let err = svc
                .patch_todo(&todo.id.to_hex(), patch_input(json!({ "title": title })))
                .await
                .unwrap_err();
            assert_eq!(invalid_fields(err).get("title"), Some("cannot be an empty string"));
        }
        assert_eq!(svc.list_todos().await.unwrap(), vec![todo]);
    }

    #[tokio::test]
    async fn patch_ignores_nulls_and_unknown_keys() {
        let svc = service();
        let todo = svc.create_todo(create_input(json!({"title": "My Todo"}))).await.unwrap();
        let patched = svc
            .patch_todo(
                &todo.id.to_hex(),
                patch_input(json!({"title": null, "completed": null, "createdAt": "x"})),
            )
            .await
            .unwrap();
        assert_eq!(patched.title, "My Todo");
        assert!(!patched.completed);
        assert_eq!(patched.created_at, todo.created_at);
    }

    #[tokio::test]
    async fn patch_is_partial_and_bumps_updated_at() {
        let svc = service();
        let todo = svc.create_todo(create_input(json!({"title": "My Todo"}))).await.unwrap();
        let id = todo.id.to_hex();

        let v2 = svc.patch_todo(&id, patch_input(json!({"completed": true}))).await.unwrap();
        assert_eq!(v2.title, "My Todo");
        assert!(v2.completed);
        assert!(v2.updated_at > v2.created_at);
        assert_eq!(v2.created_at, todo.created_at);

        let v3 = svc.patch_todo(&id, patch_input(json!({"title": "  Updated Title "}))).await.unwrap();
        assert_eq!(v3.title, "Updated Title");
        assert!(v3.completed);
        assert!(v3.updated_at >= v2.updated_at);
    }
}
