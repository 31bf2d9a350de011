//! Database layer (Firestore or in-memory).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{ObjectId, Resource};
use serde_json::Value;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const TEAMS: &str = "teams";
    pub const ACTIVITIES: &str = "activities";
    pub const LEADERBOARD: &str = "leaderboard";
    pub const WORKOUTS: &str = "workouts";

    /// Every collection, in API root order.
    pub const ALL: [&str; 5] = [USERS, TEAMS, ACTIVITIES, LEADERBOARD, WORKOUTS];
}

/// Set a raw document's `_id` to its document id.
///
/// Listings order by `_id`, so a document without it would be skipped.
pub(crate) fn stamp_id(
    collection: &str,
    id: ObjectId,
    mut doc: Value,
) -> Result<Value, AppError> {
    let Some(fields) = doc.as_object_mut() else {
        return Err(AppError::Database(format!(
            "Document {}/{} is not a JSON object",
            collection, id
        )));
    };
    fields.insert("_id".to_string(), Value::String(id.to_hex()));
    Ok(doc)
}

/// Resource store: one collection per resource, keyed by object id.
#[derive(Clone)]
pub enum Database {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

impl Database {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Database::Firestore(_) => "firestore",
            Database::Memory(_) => "memory",
        }
    }

    /// All records in storage order.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, AppError> {
        match self {
            Database::Firestore(db) => db.list().await,
            Database::Memory(db) => db.list(),
        }
    }

    /// Records whose string `field` equals `value`, in storage order.
    pub async fn find_by_field<R: Resource>(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Vec<R>, AppError> {
        match self {
            Database::Firestore(db) => db.find_by_field(field, value).await,
            Database::Memory(db) => db.find_by_field(field, value),
        }
    }

    pub async fn get<R: Resource>(&self, id: &ObjectId) -> Result<Option<R>, AppError> {
        match self {
            Database::Firestore(db) => db.get(id).await,
            Database::Memory(db) => db.get(id),
        }
    }

    /// Create or fully replace a record, enforcing its unique key.
    pub async fn upsert<R: Resource>(&self, record: &R) -> Result<(), AppError> {
        match self {
            Database::Firestore(db) => db.upsert(record).await,
            Database::Memory(db) => db.upsert(record),
        }
    }

    /// Store a raw document without validation (imports, legacy data).
    /// Its `_id` is always set from `id`.
    pub async fn put_document(
        &self,
        collection: &str,
        id: ObjectId,
        doc: Value,
    ) -> Result<(), AppError> {
        match self {
            Database::Firestore(db) => db.put_document(collection, id, doc).await,
            Database::Memory(db) => db.put_document(collection, id, doc),
        }
    }

    /// Delete a record. Returns whether it existed.
    pub async fn delete<R: Resource>(&self, id: &ObjectId) -> Result<bool, AppError> {
        match self {
            Database::Firestore(db) => db.delete::<R>(id).await,
            Database::Memory(db) => Ok(db.delete::<R>(id)),
        }
    }

    /// Delete every record of a resource. Returns how many were removed.
    pub async fn delete_all<R: Resource>(&self) -> Result<usize, AppError> {
        match self {
            Database::Firestore(db) => db.delete_all::<R>().await,
            Database::Memory(db) => Ok(db.delete_all::<R>()),
        }
    }
}
