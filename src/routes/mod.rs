// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod resources;

use crate::config::Config;
use crate::db::collections;
use crate::middleware::add_security_headers;
use crate::models::{Activity, Leaderboard, Team, User, Workout};
use crate::AppState;
use axum::extract::State;
use axum::http::{header, Method};
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
    pub storage: String,
}

/// Health check response
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
        storage: state.db.backend_name().to_string(),
    })
}

/// Collection URL for each resource.
#[derive(Debug, Serialize, PartialEq)]
pub struct ApiRoot {
    pub users: String,
    pub teams: String,
    pub activities: String,
    pub leaderboard: String,
    pub workouts: String,
}

impl ApiRoot {
    pub fn for_config(config: &Config) -> Self {
        let base_url = config.public_base_url();
        let url = |collection: &str| format!("{}/api/{}/", base_url, collection);
        Self {
            users: url(collections::USERS),
            teams: url(collections::TEAMS),
            activities: url(collections::ACTIVITIES),
            leaderboard: url(collections::LEADERBOARD),
            workouts: url(collections::WORKOUTS),
        }
    }
}

async fn api_root(State(state): State<Arc<AppState>>) -> Json<ApiRoot> {
    Json(ApiRoot::for_config(&state.config))
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // The browser frontend is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/", get(api_root))
        .route("/health", get(health_check))
        .merge(resources::routes::<User>())
        .merge(resources::routes::<Team>())
        .merge(resources::routes::<Activity>())
        .merge(resources::routes::<Leaderboard>())
        .merge(resources::routes::<Workout>())
        .layer(cors)
        .layer(axum::middleware::from_fn(add_security_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
