// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Create/read/update/delete operations shared by every resource.
//!
//! Handlers pass raw path ids and request bodies; this layer parses ids,
//! validates payloads and talks to the store.

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{ObjectId, Payload, Resource};
use serde_json::Value;

/// How an update treats fields missing from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// PUT: every required field must be supplied; absent optional fields
    /// keep their stored values.
    Replace,
    /// PATCH: missing fields keep their stored values. Supplied fields,
    /// lists included, are replaced whole.
    Partial,
}

/// Parse a path identifier. Malformed ids are reported as not found.
pub fn parse_id(raw: &str) -> Result<ObjectId> {
    ObjectId::parse_str(raw).map_err(|e| AppError::NotFound(e.to_string()))
}

fn not_found<R: Resource>(id: &ObjectId) -> AppError {
    AppError::NotFound(format!("{}/{}", R::COLLECTION, id))
}

pub async fn list<R: Resource>(db: &Database) -> Result<Vec<R>> {
    let records = db.list::<R>().await?;
    tracing::debug!(collection = R::COLLECTION, count = records.len(), "Listed records");
    Ok(records)
}

pub async fn create<R: Resource>(db: &Database, body: &Value) -> Result<R> {
    let payload = Payload::from_value(body)?;
    let record = R::from_payload(ObjectId::new(), &payload, None)?;
    db.upsert(&record).await?;

    tracing::info!(
        collection = R::COLLECTION,
        id = %record.id(),
        label = %record.label(),
        "Created record"
    );
    Ok(record)
}

pub async fn retrieve<R: Resource>(db: &Database, raw_id: &str) -> Result<R> {
    let id = parse_id(raw_id)?;
    db.get::<R>(&id).await?.ok_or_else(|| not_found::<R>(&id))
}

/// Validate and persist an update. Last write wins.
pub async fn update<R: Resource>(
    db: &Database,
    raw_id: &str,
    body: &Value,
    mode: UpdateMode,
) -> Result<R> {
    let id = parse_id(raw_id)?;
    let current = db
        .get::<R>(&id)
        .await?
        .ok_or_else(|| not_found::<R>(&id))?;

    let payload = match mode {
        UpdateMode::Replace => Payload::from_value(body)?,
        UpdateMode::Partial => Payload::from_value(body)?.partial(),
    };
    let record = R::from_payload(id, &payload, Some(&current))?;
    db.upsert(&record).await?;

    tracing::info!(
        collection = R::COLLECTION,
        id = %id,
        label = %record.label(),
        partial = mode == UpdateMode::Partial,
        "Updated record"
    );
    Ok(record)
}

pub async fn destroy<R: Resource>(db: &Database, raw_id: &str) -> Result<()> {
    let id = parse_id(raw_id)?;
    if !db.delete::<R>(&id).await? {
        return Err(not_found::<R>(&id));
    }

    tracing::info!(collection = R::COLLECTION, id = %id, "Deleted record");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDb;
    use crate::models::{Leaderboard, Team, User};
    use serde_json::json;

    fn memory_db() -> Database {
        Database::Memory(MemoryDb::new())
    }

    #[tokio::test]
    async fn test_create_then_retrieve() {
        let db = memory_db();
        let team: Team = create(&db, &json!({"name": "Team Marvel", "members": ["ironman"]}))
            .await
            .unwrap();

        let fetched: Team = retrieve(&db, &team.id.to_hex()).await.unwrap();
        assert_eq!(fetched, team);
    }

    #[tokio::test]
    async fn test_malformed_and_unknown_ids_not_found() {
        let db = memory_db();
        for raw in ["not-an-id", "123", "65a1b2c3d4e5f60718293a4b"] {
            let err = retrieve::<User>(&db, raw).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)), "{raw}");
            let err = destroy::<User>(&db, raw).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)), "{raw}");
        }
    }

    #[tokio::test]
    async fn test_replace_requires_fields_partial_keeps_values() {
        let db = memory_db();
        let entry: Leaderboard = create(
            &db,
            &json!({"username": "thor", "score": 870, "calories": 480}),
        )
        .await
        .unwrap();
        let id = entry.id.to_hex();

        let patched: Leaderboard = update(&db, &id, &json!({"score": 900}), UpdateMode::Partial)
            .await
            .unwrap();
        assert_eq!((patched.score, patched.calories), (900, 480));

        let replaced: Leaderboard = update(
            &db,
            &id,
            &json!({"username": "thor", "score": 901}),
            UpdateMode::Replace,
        )
        .await
        .unwrap();
        assert_eq!((replaced.score, replaced.calories), (901, 480));

        let err = update::<Leaderboard>(&db, &id, &json!({"score": 1}), UpdateMode::Replace)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref f) if f.get("username").is_some()));
    }

    #[tokio::test]
    async fn test_failed_update_leaves_record_untouched() {
        let db = memory_db();
        let user: User = create(
            &db,
            &json!({"username": "thor", "email": "thor@asgard.com", "password": "mjolnir99"}),
        )
        .await
        .unwrap();

        let err = update::<User>(
            &db,
            &user.id.to_hex(),
            &json!({"username": "", "email": "odinson@asgard.com"}),
            UpdateMode::Partial,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let stored: User = retrieve(&db, &user.id.to_hex()).await.unwrap();
        assert_eq!(stored, user);
    }
}
