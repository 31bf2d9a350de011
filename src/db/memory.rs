// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store.
//!
//! Documents are kept as JSON values, one ordered map per collection, so
//! reads go through the same deserialization path as Firestore documents
//! (including legacy text-encoded list fields).

use super::stamp_id;
use crate::error::{AppError, FieldErrors};
use crate::models::{ObjectId, Resource, UniqueKey};
use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

type Collection = BTreeMap<ObjectId, Value>;

/// In-memory database, cheap to clone and shared between handlers.
#[derive(Clone, Default)]
pub struct MemoryDb {
    collections: Arc<DashMap<String, Collection>>,
}

fn encode<R: Resource>(record: &R) -> Result<Value, AppError> {
    serde_json::to_value(record)
        .map_err(|e| AppError::Database(format!("Failed to encode {}: {}", R::COLLECTION, e)))
}

fn decode<R: Resource>(id: &ObjectId, doc: &Value) -> Result<R, AppError> {
    serde_json::from_value(doc.clone()).map_err(|e| {
        AppError::Database(format!(
            "Failed to decode {}/{}: {}",
            R::COLLECTION,
            id,
            e
        ))
    })
}

fn field_matches(doc: &Value, field: &str, value: &str) -> bool {
    doc.get(field).and_then(Value::as_str) == Some(value)
}

/// Fail if another document already holds the record's unique value.
fn check_unique(collection: &Collection, id: &ObjectId, key: &UniqueKey) -> Result<(), AppError> {
    let taken = collection
        .iter()
        .any(|(other, doc)| other != id && field_matches(doc, key.field, &key.value));
    if taken {
        Err(AppError::Validation(FieldErrors::single(key.field, key.message)))
    } else {
        Ok(())
    }
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list<R: Resource>(&self) -> Result<Vec<R>, AppError> {
        let Some(collection) = self.collections.get(R::COLLECTION) else {
            return Ok(Vec::new());
        };
        collection.iter().map(|(id, doc)| decode(id, doc)).collect()
    }

    pub fn find_by_field<R: Resource>(&self, field: &str, value: &str) -> Result<Vec<R>, AppError> {
        let Some(collection) = self.collections.get(R::COLLECTION) else {
            return Ok(Vec::new());
        };
        collection
            .iter()
            .filter(|(_, doc)| field_matches(doc, field, value))
            .map(|(id, doc)| decode(id, doc))
            .collect()
    }

    pub fn get<R: Resource>(&self, id: &ObjectId) -> Result<Option<R>, AppError> {
        self.collections
            .get(R::COLLECTION)
            .and_then(|collection| collection.get(id).map(|doc| decode(id, doc)))
            .transpose()
    }

    /// Write a record, creating or replacing it.
    ///
    /// The uniqueness check and the write happen under the collection lock.
    pub fn upsert<R: Resource>(&self, record: &R) -> Result<(), AppError> {
        let id = record.id();
        let doc = encode(record)?;
        let mut collection = self.collections.entry(R::COLLECTION.to_string()).or_default();
        if let Some(key) = record.unique_key() {
            check_unique(&collection, &id, &key)?;
        }
        collection.insert(id, doc);
        Ok(())
    }

    /// Store a raw document, bypassing validation.
    pub fn put_document(
        &self,
        collection: &str,
        id: ObjectId,
        doc: Value,
    ) -> Result<(), AppError> {
        let doc = stamp_id(collection, id, doc)?;
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, doc);
        Ok(())
    }

    /// Remove a record. Returns whether it existed.
    pub fn delete<R: Resource>(&self, id: &ObjectId) -> bool {
        self.collections
            .get_mut(R::COLLECTION)
            .is_some_and(|mut collection| collection.remove(id).is_some())
    }

    /// Remove every record in the collection. Returns how many were removed.
    pub fn delete_all<R: Resource>(&self) -> usize {
        self.collections
            .remove(R::COLLECTION)
            .map_or(0, |(_, collection)| collection.len())
    }
}
