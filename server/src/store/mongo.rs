use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};

use super::{StoreError, TodoStore};
use crate::todos::{NewTodo, Todo, TodoChanges, MIN_UPDATE_STEP};

const COLLECTION: &str = "todos";

/// Shape of a todo inside the `todos` collection.
#[derive(Debug, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    completed: bool,
    #[serde(rename = "createdAt")]
    created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    updated_at: bson::DateTime,
}

impl TryFrom<TodoDocument> for Todo {
    type Error = StoreError;

    fn try_from(doc: TodoDocument) -> Result<Self, Self::Error> {
        Ok(Todo {
            id: doc.id,
            title: doc.title,
            completed: doc.completed,
            created_at: to_chrono(doc.created_at)?,
            updated_at: to_chrono(doc.updated_at)?,
        })
    }
}

fn to_bson(at: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(at.timestamp_millis())
}

fn to_chrono(at: bson::DateTime) -> Result<DateTime<Utc>, StoreError> {
    let millis = at.timestamp_millis();
    DateTime::from_timestamp_millis(millis).ok_or(StoreError::Timestamp(millis))
}

/// MongoDB-backed store over the `todos` collection.
///
/// Cloning is cheap; the driver pools connections behind the handle.
#[derive(Clone, Debug)]
pub struct MongoStore {
    todos: Collection<TodoDocument>,
}

impl MongoStore {
    pub fn new(db: &Database) -> Self {
        Self {
            todos: db.collection(COLLECTION),
        }
    }

    /// Connect to `uri`, check the server answers a `ping`, and open `db_name`.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(db_name);
        db.run_command(doc! { "ping": 1 }).await?;
        tracing::info!(db = db_name, "connected to mongodb");
        Ok(Self::new(&db))
    }
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let docs: Vec<TodoDocument> = self
            .todos
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await?
            .try_collect()
            .await?;
        docs.into_iter().map(Todo::try_from).collect()
    }

    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let todo = todo.into_todo(ObjectId::new());
        let doc = TodoDocument {
            id: todo.id,
            title: todo.title.clone(),
            completed: todo.completed,
            created_at: to_bson(todo.created_at),
            updated_at: to_bson(todo.updated_at),
        };
        self.todos.insert_one(&doc).await?;
        Ok(todo)
    }

    async fn update(&self, id: ObjectId, changes: TodoChanges) -> Result<Option<Todo>, StoreError> {
        self.todos
            .find_one_and_update(doc! { "_id": id }, update_pipeline(&changes))
            .return_document(ReturnDocument::After)
            .await?
            .map(Todo::try_from)
            .transpose()
    }
}

/// Single-stage pipeline so `updatedAt` can be floored against the stored
/// `createdAt` in the same atomic operation.
fn update_pipeline(changes: &TodoChanges) -> Vec<Document> {
    let step = MIN_UPDATE_STEP.num_milliseconds();
    let mut set = doc! {
        "updatedAt": {
            "$max": [to_bson(changes.updated_at), { "$add": ["$createdAt", step] }]
        }
    };
    if let Some(title) = &changes.title {
        set.insert("title", doc! { "$literal": title.as_str() });
    }
    if let Some(completed) = changes.completed {
        set.insert("completed", doc! { "$literal": completed });
    }
    vec![doc! { "$set": set }]
}
