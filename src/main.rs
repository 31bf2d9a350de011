// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OctoFit Tracker API Server
//!
//! Serves the users, teams, activities, leaderboard and workouts resources
//! over HTTP.

use anyhow::Context;
use octofit_tracker::{
    config::{Config, StorageBackend},
    db::{Database, FirestoreDb, MemoryDb},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        port = config.port,
        storage = ?config.storage,
        "Starting OctoFit Tracker API"
    );

    let db = match config.storage {
        StorageBackend::Firestore => Database::Firestore(
            FirestoreDb::new(&config.gcp_project_id)
                .await
                .context("Failed to connect to Firestore")?,
        ),
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Database::Memory(MemoryDb::new())
        }
    };

    tracing::info!(base_url = %config.public_base_url(), "API root configured");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
    });

    // Build router
    let app = octofit_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("octofit_tracker=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
