use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{StoreError, TodoStore};
use crate::todos::{NewTodo, Todo, TodoChanges};

/// In-process store. Todos are kept in insertion order, which is the same
/// order `MongoStore` yields by sorting on `_id`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.todos.read().await.clone())
    }

    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let todo = todo.into_todo(ObjectId::new());
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: ObjectId, changes: TodoChanges) -> Result<Option<Todo>, StoreError> {
        let mut todos = self.todos.write().await;
        let Some(todo) = todos.iter_mut().find(|todo| todo.id == id) else {
            return Ok(None);
        };
        changes.apply(todo);
        Ok(Some(todo.clone()))
    }
}
