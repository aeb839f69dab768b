//! HTTP backend for the todoman todo list.
//!
//! # Overview
//! `app` builds the axum router over a `TodoService`; `run` serves it on an
//! already bound listener. The binary wires in `MongoStore`, tests wire in
//! `MemoryStore`.

pub mod config;
pub mod error;
pub mod store;
pub mod todos;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub use config::Config;
pub use error::{InvalidFields, TodoError};
pub use store::{MemoryStore, MongoStore, StoreError, TodoStore};
pub use todos::{Todo, TodoService};

pub const SERVICE_NAME: &str = "todoman-backend";

pub fn app(service: TodoService) -> Router {
    Router::new()
        .route("/", get(identity))
        .merge(todos::routes())
        .with_state(service)
}

/// Router backed by a fresh in-memory store.
pub fn memory_app() -> Router {
    app(TodoService::new(Arc::new(MemoryStore::new())))
}

pub async fn run(listener: TcpListener, service: TodoService) -> Result<(), std::io::Error> {
    axum::serve(listener, app(service)).await
}

async fn identity() -> Json<Value> {
    Json(json!({ "name": SERVICE_NAME }))
}
