//! The todo resource: model, request schemas, service and routes.

mod input;
mod model;
mod routes;
mod service;

pub use input::{CreateTodoInput, Field, PatchTodoInput};
pub use model::{now, NewTodo, Todo, TodoChanges, MIN_UPDATE_STEP};
pub use routes::routes;
pub use service::TodoService;
