// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workouts endpoint tests.

use axum::http::StatusCode;
use octofit_tracker::models::ObjectId;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_workout_crud_cycle() {
    let (app, _) = common::create_test_app();

    let workout = common::create(
        &app,
        "workouts",
        json!({
            "name": "Gotham Night Patrol",
            "description": "Stealth and strength training.",
            "exercises": ["grappling hook pull-ups", "silent movement drills"],
        }),
    )
    .await;
    let uri = format!("/api/workouts/{}/", workout["_id"].as_str().unwrap());

    let (status, body) = common::send(
        &app,
        "PUT",
        &uri,
        Some(json!({
            "name": "Gotham Night Patrol",
            "description": "Updated.",
            "exercises": "('batarang accuracy throws',)",
        })),
    )
    .await;
    // A tuple literal is not a list.
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["exercises"], json!(["Expected a list of strings."]));

    let (status, body) = common::send(
        &app,
        "PUT",
        &uri,
        Some(json!({
            "name": "Gotham Night Patrol",
            "description": "Updated.",
            "exercises": "['batarang accuracy throws']",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exercises"], json!(["batarang accuracy throws"]));
    assert_eq!(body["description"], "Updated.");

    let (status, _) = common::send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = common::send(&app, "GET", "/api/workouts/", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_legacy_exercises_text_normalized() {
    let (app, state) = common::create_test_app();
    let id = ObjectId::new();
    state
        .db
        .put_document(
            "workouts",
            id,
            json!({
                "_id": id.to_hex(),
                "name": "Speed Force Intervals",
                "description": "Lightning-fast interval training.",
                "exercises": "[\"rapid interval sprints\", 'speed force meditation']",
            }),
        )
        .await
        .unwrap();

    let (status, body) =
        common::send(&app, "GET", &format!("/api/workouts/{}/", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["exercises"],
        json!(["rapid interval sprints", "speed force meditation"])
    );
}
