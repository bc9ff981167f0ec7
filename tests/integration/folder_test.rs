//! Integration tests for folder creation.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{MultipartForm, TEST_SECRET, TestApp, sign_token};

#[tokio::test]
async fn test_nested_folders_build_paths() {
    let app = TestApp::new();
    let token = app.token_for("user_u");

    let response = app
        .request(
            "POST",
            "/api/folder/create",
            Some(json!({ "name": "Projects", "parentId": null, "userId": "user_u" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["isFolder"], true);
    assert_eq!(response.body["parentId"], serde_json::Value::Null);
    assert_eq!(response.body["path"], "/Projects");
    assert_eq!(response.body["type"], "folder");
    assert_eq!(response.body["size"], 0);
    assert_eq!(response.body["userId"], "user_u");
    let projects_id = response.str_field("id").to_string();

    let response = app
        .request(
            "POST",
            "/api/folder/create",
            Some(json!({ "name": "Q1", "parentId": projects_id })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["path"], "/Projects/Q1");
    assert_eq!(response.body["parentId"], projects_id.as_str());
}

#[tokio::test]
async fn test_other_users_folder_is_parent_not_found() {
    let app = TestApp::new();
    let owner = app.token_for("user_u");
    let intruder = app.token_for("user_v");
    let projects_id = app.create_folder(&owner, "Projects", None).await;

    let response = app
        .request(
            "POST",
            "/api/folder/create",
            Some(json!({ "name": "Hack", "parentId": projects_id })),
            Some(&intruder),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "PARENT_NOT_FOUND");
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_missing_and_file_parents_look_the_same() {
    let app = TestApp::new();
    let token = app.token_for("user_u");

    let missing = app
        .request(
            "POST",
            "/api/folder/create",
            Some(json!({ "name": "A", "parentId": uuid::Uuid::new_v4().to_string() })),
            Some(&token),
        )
        .await;

    let upload = app
        .upload(
            MultipartForm::new().file("file", "photo.png", "image/png", b"png"),
            Some(&token),
        )
        .await;
    assert_eq!(upload.status, StatusCode::OK);
    let file_as_parent = app
        .request(
            "POST",
            "/api/folder/create",
            Some(json!({ "name": "A", "parentId": upload.str_field("id") })),
            Some(&token),
        )
        .await;

    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(file_as_parent.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body, file_as_parent.body);
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let app = TestApp::new();
    let token = app.token_for("user_u");

    let response = app
        .request(
            "POST",
            "/api/folder/create",
            Some(json!({ "name": "   ", "parentId": null })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_INPUT");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_malformed_parent_id_is_rejected() {
    let app = TestApp::new();
    let token = app.token_for("user_u");

    let response = app
        .request(
            "POST",
            "/api/folder/create",
            Some(json!({ "name": "A", "parentId": "not-a-uuid" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_asserted_user_must_match_session() {
    let app = TestApp::new();
    let token = app.token_for("user_u");

    let response = app
        .request(
            "POST",
            "/api/folder/create",
            Some(json!({ "name": "A", "userId": "user_v" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHORIZED");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_requires_valid_session() {
    let app = TestApp::new();
    let body = json!({ "name": "A" });

    let anonymous = app
        .request("POST", "/api/folder/create", Some(body.clone()), None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let forged = sign_token("user_u", "some-other-secret", 3600);
    let response = app
        .request("POST", "/api/folder/create", Some(body.clone()), Some(&forged))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let expired = sign_token("user_u", TEST_SECRET, -3600);
    let response = app
        .request("POST", "/api/folder/create", Some(body), Some(&expired))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_duplicate_names_create_siblings() {
    let app = TestApp::new();
    let token = app.token_for("user_u");

    let first = app.create_folder(&token, "Docs", None).await;
    let second = app.create_folder(&token, "Docs", None).await;

    assert_ne!(first, second);
    assert_eq!(app.store.len().await, 2);
}

#[tokio::test]
async fn test_mismatched_user_wins_over_malformed_parent() {
    let app = TestApp::new();
    let token = app.token_for("user_u");

    let response = app
        .request(
            "POST",
            "/api/folder/create",
            Some(json!({ "name": "A", "parentId": "not-a-uuid", "userId": "user_v" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHORIZED");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_padded_name_within_limit_is_accepted() {
    let app = TestApp::new();
    let token = app.token_for("user_u");
    let name = format!("     {}", "n".repeat(250));

    let response = app
        .request(
            "POST",
            "/api/folder/create",
            Some(json!({ "name": name })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.str_field("name").len(), 250);
}
