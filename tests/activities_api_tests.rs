// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activities endpoint tests.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_create_activity() {
    let (app, _) = common::create_test_app();

    let activity = common::create(
        &app,
        "activities",
        json!({
            "username": "ironman",
            "activity_type": "flight training",
            "duration": 45.0,
            "date": "2024-01-10",
        }),
    )
    .await;

    assert_eq!(activity["username"], "ironman");
    assert_eq!(activity["activity_type"], "flight training");
    assert_eq!(activity["duration"], 45.0);
    assert_eq!(activity["date"], "2024-01-10");

    let uri = format!("/api/activities/{}/", activity["_id"].as_str().unwrap());
    let (status, fetched) = common::send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, activity);
}

#[tokio::test]
async fn test_activity_validation_errors() {
    let (app, _) = common::create_test_app();

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/activities/",
        Some(json!({
            "username": "spiderman",
            "activity_type": "web swinging",
            "duration": "half an hour",
            "date": "2024-02-30",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["duration"], json!(["A valid number is required."]));
    assert!(body["fields"]["date"][0]
        .as_str()
        .unwrap()
        .starts_with("Date has wrong format."));
}

#[tokio::test]
async fn test_patch_activity_duration_only() {
    let (app, _) = common::create_test_app();
    let activity = common::create(
        &app,
        "activities",
        json!({
            "username": "thor",
            "activity_type": "hammer lifting",
            "duration": 50,
            "date": "2024-01-13",
        }),
    )
    .await;
    let uri = format!("/api/activities/{}", activity["_id"].as_str().unwrap());

    let (status, body) =
        common::send(&app, "PATCH", &uri, Some(json!({"duration": "62.5"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration"], 62.5);
    assert_eq!(body["date"], "2024-01-13");
    assert_eq!(body["activity_type"], "hammer lifting");
}
