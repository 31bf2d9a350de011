// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CRUD endpoints, instantiated once per resource type.

use crate::error::{AppError, Result};
use crate::models::Resource;
use crate::services::crud::{self, UpdateMode};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

/// Routes for `/api/{collection}/` and `/api/{collection}/{id}/`.
///
/// Paths are served with and without the trailing slash.
pub fn routes<R: Resource>() -> Router<Arc<AppState>> {
    let collection = format!("/api/{}", R::COLLECTION);
    let item = format!("/api/{}/{{id}}", R::COLLECTION);

    let collection_handlers = || get(list::<R>).post(create::<R>);
    let item_handlers = || {
        get(retrieve::<R>)
            .put(replace::<R>)
            .patch(partial_update::<R>)
            .delete(destroy::<R>)
    };

    Router::new()
        .route(&collection, collection_handlers())
        .route(&format!("{}/", collection), collection_handlers())
        .route(&item, item_handlers())
        .route(&format!("{}/", item), item_handlers())
}

fn body(json: std::result::Result<Json<Value>, JsonRejection>) -> Result<Value> {
    json.map(|Json(value)| value).map_err(AppError::from)
}

async fn list<R: Resource>(State(state): State<Arc<AppState>>) -> Result<Json<Vec<R>>> {
    Ok(Json(crud::list(&state.db).await?))
}

async fn create<R: Resource>(
    State(state): State<Arc<AppState>>,
    json: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<R>)> {
    let record = crud::create::<R>(&state.db, &body(json)?).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn retrieve<R: Resource>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<R>> {
    Ok(Json(crud::retrieve(&state.db, &id).await?))
}

async fn replace<R: Resource>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    json: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<R>> {
    update::<R>(&state, &id, json, UpdateMode::Replace).await
}

async fn partial_update<R: Resource>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    json: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<R>> {
    update::<R>(&state, &id, json, UpdateMode::Partial).await
}

async fn update<R: Resource>(
    state: &AppState,
    id: &str,
    json: std::result::Result<Json<Value>, JsonRejection>,
    mode: UpdateMode,
) -> Result<Json<R>> {
    let value = match body(json) {
        Ok(value) => value,
        Err(err) => {
            // A missing record is reported as 404 even when the body is also bad.
            crud::retrieve::<R>(&state.db, id).await?;
            return Err(err);
        }
    };
    Ok(Json(crud::update(&state.db, id, &value, mode).await?))
}

async fn destroy<R: Resource>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    crud::destroy::<R>(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
