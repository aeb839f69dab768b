//! Todo entity and the write payloads the service hands to a store.

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Serialize, Serializer};

/// Smallest step between `createdAt` and a patched `updatedAt`.
pub const MIN_UPDATE_STEP: TimeDelta = TimeDelta::milliseconds(1);

/// A persisted todo as rendered over the wire.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Todo {
    #[serde(rename = "_id", serialize_with = "object_id_as_hex")]
    pub id: ObjectId,
    pub title: String,
    pub completed: bool,
    #[serde(rename = "createdAt", serialize_with = "millis_rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", serialize_with = "millis_rfc3339")]
    pub updated_at: DateTime<Utc>,
}

/// A validated todo that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewTodo {
    pub fn into_todo(self, id: ObjectId) -> Todo {
        Todo {
            id,
            title: self.title,
            completed: self.completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A validated partial update. `None` fields are left untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl TodoChanges {
    pub fn apply(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        todo.updated_at = self.updated_at_after(todo.created_at);
    }

    /// `updated_at`, moved forward when needed so a patched todo is always
    /// strictly newer than its creation time.
    pub fn updated_at_after(&self, created_at: DateTime<Utc>) -> DateTime<Utc> {
        self.updated_at.max(created_at + MIN_UPDATE_STEP)
    }
}

/// Current time truncated to milliseconds, the store's datetime precision.
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

fn millis_rfc3339<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn object_id_as_hex<S: Serializer>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&id.to_hex())
}
