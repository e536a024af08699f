// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the REST facade, driven through the router with
//! a real SQLite store underneath.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use arogya_config::model::StorageConfig;
use arogya_core::StorageAdapter;
use arogya_gateway::{GatewayState, build_router};
use arogya_storage::SqliteStorage;

async fn test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let storage = SqliteStorage::new(StorageConfig {
        database_path: dir.path().join("test.db").display().to_string(),
    });
    storage.initialize().await.unwrap();
    let state = GatewayState {
        storage: Arc::new(storage),
    };
    (build_router(state), dir)
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn signup_and_login(app: &Router, email: &str, password: &str) -> String {
    let creds = serde_json::json!({"email": email, "password": password});
    let (status, _) = send_json(app, "POST", "/api/signup", None, Some(creds.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(app, "POST", "/api/login", None, Some(creds)).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let (app, _dir) = test_app().await;
    let (status, body) = send_json(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn signup_rejects_duplicate_email() {
    let (app, _dir) = test_app().await;
    let creds = serde_json::json!({"email": "asha@example.com", "password": "s3cret"});

    let (status, body) = send_json(&app, "POST", "/api/signup", None, Some(creds.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "User created");

    let (status, body) = send_json(&app, "POST", "/api/signup", None, Some(creds)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "User already exists");
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let (app, _dir) = test_app().await;
    let creds = serde_json::json!({"email": "asha@example.com", "password": "s3cret"});
    send_json(&app, "POST", "/api/signup", None, Some(creds)).await;

    let wrong = serde_json::json!({"email": "asha@example.com", "password": "wrong"});
    let (status, body) = send_json(&app, "POST", "/api/login", None, Some(wrong)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "Invalid credentials");

    // Unknown email gets the same answer.
    let unknown = serde_json::json!({"email": "nobody@example.com", "password": "s3cret"});
    let (status, body) = send_json(&app, "POST", "/api/login", None, Some(unknown)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "Invalid credentials");
}

#[tokio::test]
async fn login_returns_bearer_token() {
    let (app, _dir) = test_app().await;
    let token = signup_and_login(&app, "asha@example.com", "s3cret").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn chat_routes_require_token() {
    let (app, _dir) = test_app().await;
    let body = serde_json::json!({"userEmail": "asha@example.com", "messages": []});

    let (status, _) = send_json(&app, "POST", "/api/chats", None, Some(body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send_json(&app, "GET", "/api/chats/asha@example.com", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) =
        send_json(&app, "DELETE", "/api/chats/some-id", Some("bogus-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn save_list_delete_roundtrip() {
    let (app, _dir) = test_app().await;
    let token = signup_and_login(&app, "asha@example.com", "s3cret").await;

    let save = serde_json::json!({
        "userEmail": "asha@example.com",
        "messages": [
            {"sender": "user", "text": "I have a fever"},
            {"sender": "bot", "text": "• Rest well 💤", "audio_lang": "en-US"}
        ]
    });
    let (status, chat) = send_json(&app, "POST", "/api/chats", Some(&token), Some(save)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chat["title"], "I have a fever");
    let chat_id = chat["id"].as_str().unwrap().to_string();

    let (status, chats) =
        send_json(&app, "GET", "/api/chats/asha@example.com", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chats.as_array().unwrap().len(), 1);
    assert_eq!(chats[0]["messages"][1]["audio_lang"], "en-US");

    let (status, body) = send_json(
        &app,
        "DELETE",
        &format!("/api/chats/{chat_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Chat deleted");

    let (_, chats) =
        send_json(&app, "GET", "/api/chats/asha@example.com", Some(&token), None).await;
    assert!(chats.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn long_first_message_truncates_title_to_thirty_chars() {
    let (app, _dir) = test_app().await;
    let token = signup_and_login(&app, "asha@example.com", "s3cret").await;

    let save = serde_json::json!({
        "userEmail": "asha@example.com",
        "messages": [
            {"sender": "user", "text": "I have had a fever and a headache since yesterday evening"}
        ]
    });
    let (_, chat) = send_json(&app, "POST", "/api/chats", Some(&token), Some(save)).await;
    assert_eq!(chat["title"], "I have had a fever and a heada");

    let empty = serde_json::json!({"userEmail": "asha@example.com", "messages": []});
    let (_, chat) = send_json(&app, "POST", "/api/chats", Some(&token), Some(empty)).await;
    assert_eq!(chat["title"], "Chat");
}

#[tokio::test]
async fn save_for_another_user_is_forbidden() {
    let (app, _dir) = test_app().await;
    let token = signup_and_login(&app, "asha@example.com", "s3cret").await;

    let save = serde_json::json!({"userEmail": "ravi@example.com", "messages": []});
    let (status, _) = send_json(&app, "POST", "/api/chats", Some(&token), Some(save)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn list_scoped_to_authenticated_identity() {
    let (app, _dir) = test_app().await;
    let token = signup_and_login(&app, "asha@example.com", "s3cret").await;
    signup_and_login(&app, "ravi@example.com", "hunter2").await;

    let (status, _) =
        send_json(&app, "GET", "/api/chats/ravi@example.com", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn delete_cannot_touch_foreign_chats() {
    let (app, _dir) = test_app().await;
    let asha = signup_and_login(&app, "asha@example.com", "s3cret").await;
    let ravi = signup_and_login(&app, "ravi@example.com", "hunter2").await;

    let save = serde_json::json!({
        "userEmail": "ravi@example.com",
        "messages": [{"sender": "user", "text": "pet ma dard che"}]
    });
    let (_, chat) = send_json(&app, "POST", "/api/chats", Some(&ravi), Some(save)).await;
    let chat_id = chat["id"].as_str().unwrap().to_string();

    // Asha's token cannot delete Ravi's chat; it reads as not found.
    let (status, body) = send_json(
        &app,
        "DELETE",
        &format!("/api/chats/{chat_id}"),
        Some(&asha),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Chat not found");

    // The chat is still there for its owner.
    let (_, chats) =
        send_json(&app, "GET", "/api/chats/ravi@example.com", Some(&ravi), None).await;
    assert_eq!(chats.as_array().unwrap().len(), 1);
}
