// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! OctoFit Tracker: REST API for a fitness-tracking app.
//!
//! This crate exposes users, teams, activities, leaderboard entries and
//! workouts as CRUD resources backed by a document store.

pub mod config;
pub mod db;
pub mod error;
pub mod list_field;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Database;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
}
