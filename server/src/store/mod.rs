//! Persistence seam for todos.
//!
//! # Design
//! `TodoStore` is the only thing the service knows about persistence. Each
//! method maps to exactly one atomic store operation, so the service never
//! needs to lock or retry. `MongoStore` is the production backend;
//! `MemoryStore` keeps the same ordering and update semantics in process for
//! tests.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::todos::{NewTodo, Todo, TodoChanges};

/// Errors raised by a `TodoStore` backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("mongodb: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// A stored datetime cannot be represented as a UTC timestamp.
    #[error("stored timestamp {0}ms is out of range")]
    Timestamp(i64),
}

#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// All todos in ascending id order.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    /// Persist a new todo and return it with its assigned id.
    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError>;

    /// Apply `changes` to the todo with `id` and return the updated todo,
    /// or `None` when no todo has that id.
    async fn update(&self, id: ObjectId, changes: TodoChanges) -> Result<Option<Todo>, StoreError>;
}
