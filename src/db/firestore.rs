// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Every resource lives in its own collection; the document id is the hex
//! object id, which is also stored in the `_id` field so listings can be
//! ordered by creation.

use super::stamp_id;
use crate::error::{AppError, FieldErrors};
use crate::models::{ObjectId, Resource};
use firestore::FirestoreQueryDirection;
use futures_util::{stream, StreamExt};
use serde_json::Value;

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;
const MAX_CONCURRENT_DB_OPS: usize = 8;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

fn db_err(e: impl std::fmt::Display) -> AppError {
    AppError::Database(e.to_string())
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    // ─── Reads ───────────────────────────────────────────────────

    /// All records in the collection, oldest first.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, AppError> {
        self.client
            .fluent()
            .select()
            .from(R::COLLECTION)
            .order_by([("_id", FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(db_err)
    }

    /// Records whose string `field` equals `value`.
    pub async fn find_by_field<R: Resource>(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Vec<R>, AppError> {
        let field = field.to_string();
        let value = value.to_string();
        self.client
            .fluent()
            .select()
            .from(R::COLLECTION)
            .filter(move |q| q.for_all([q.field(field.as_str()).eq(value.clone())]))
            .obj()
            .query()
            .await
            .map_err(db_err)
    }

    pub async fn get<R: Resource>(&self, id: &ObjectId) -> Result<Option<R>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(R::COLLECTION)
            .obj()
            .one(&id.to_hex())
            .await
            .map_err(db_err)
    }

    // ─── Writes ──────────────────────────────────────────────────

    /// Create or replace a record.
    ///
    /// Unique fields are checked with a query before the write; two racing
    /// writers can still both succeed.
    pub async fn upsert<R: Resource>(&self, record: &R) -> Result<(), AppError> {
        if let Some(key) = record.unique_key() {
            let holders: Vec<R> = self.find_by_field(key.field, &key.value).await?;
            if holders.iter().any(|other| other.id() != record.id()) {
                return Err(AppError::Validation(FieldErrors::single(
                    key.field,
                    key.message,
                )));
            }
        }

        let _: R = self
            .client
            .fluent()
            .update()
            .in_col(R::COLLECTION)
            .document_id(record.id().to_hex())
            .object(record)
            .execute()
            .await
            .map_err(db_err)?;
        Ok(())
    }

    /// Store a raw document, bypassing validation.
    pub async fn put_document(
        &self,
        collection: &str,
        id: ObjectId,
        doc: Value,
    ) -> Result<(), AppError> {
        let doc = stamp_id(collection, id, doc)?;
        let _: Value = self
            .client
            .fluent()
            .update()
            .in_col(collection)
            .document_id(id.to_hex())
            .object(&doc)
            .execute()
            .await
            .map_err(db_err)?;
        Ok(())
    }

    /// Delete a record. Returns whether it existed.
    pub async fn delete<R: Resource>(&self, id: &ObjectId) -> Result<bool, AppError> {
        // Firestore deletes of missing documents succeed, so look first.
        if self.get::<R>(id).await?.is_none() {
            return Ok(false);
        }

        self.client
            .fluent()
            .delete()
            .from(R::COLLECTION)
            .document_id(id.to_hex())
            .execute()
            .await
            .map_err(db_err)?;
        Ok(true)
    }

    /// Delete every record in the collection. Returns how many were removed.
    pub async fn delete_all<R: Resource>(&self) -> Result<usize, AppError> {
        let records: Vec<R> = self.list().await?;
        let ids: Vec<String> = records.iter().map(|r| r.id().to_hex()).collect();

        let chunks: Vec<&[String]> = ids.chunks(BATCH_SIZE).collect();
        stream::iter(chunks)
            .map(|chunk| self.delete_batch(R::COLLECTION, chunk))
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        tracing::debug!(collection = R::COLLECTION, count = ids.len(), "Deleted all documents");
        Ok(ids.len())
    }

    /// Delete one batch of documents in a single transaction.
    async fn delete_batch(&self, collection: &str, doc_ids: &[String]) -> Result<(), AppError> {
        let mut transaction = self
            .client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        for doc_id in doc_ids {
            self.client
                .fluent()
                .delete()
                .from(collection)
                .document_id(doc_id)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!(
                        "Failed to add deletion to transaction for {}: {}",
                        collection, e
                    ))
                })?;
        }

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit batch deletion: {}", e)))?;
        Ok(())
    }
}
