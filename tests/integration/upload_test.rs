//! Integration tests for direct-to-provider uploads.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_upload_records_node() {
    let app = TestApp::new();
    let token = app.token_for("user_u");
    let folder_id = app.create_folder(&token, "Photos", None).await;

    let response = app
        .request(
            "POST",
            "/api/upload",
            Some(json!({
                "imagekit": {
                    "name": "beach.jpg",
                    "size": 2048,
                    "filePath": format!("/dropvault/user_u/folders/{folder_id}/beach.jpg"),
                    "url": "https://ik.imagekit.io/demo/beach.jpg",
                    "fileType": "image",
                    "thumbnailUrl": "https://ik.imagekit.io/demo/tr:n-thumb/beach.jpg"
                },
                "userId": "user_u",
                "parentId": folder_id
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["name"], "beach.jpg");
    assert_eq!(response.body["size"], 2048);
    assert_eq!(response.body["type"], "image");
    assert_eq!(response.body["parentId"], folder_id.as_str());
    assert_eq!(
        response.body["thumbnailUrl"],
        "https://ik.imagekit.io/demo/tr:n-thumb/beach.jpg"
    );
    assert!(app.blobs.uploads().is_empty());
}

#[tokio::test]
async fn test_register_upload_without_url_is_invalid() {
    let app = TestApp::new();
    let token = app.token_for("user_u");

    let response = app
        .request(
            "POST",
            "/api/upload",
            Some(json!({ "upload": { "name": "a.png", "size": 1, "filePath": "/x/a.png" } })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.str_field("error"), "Invalid upload data");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_register_upload_checks_parent_owner() {
    let app = TestApp::new();
    let owner = app.token_for("user_u");
    let intruder = app.token_for("user_v");
    let folder_id = app.create_folder(&owner, "Photos", None).await;

    let response = app
        .request(
            "POST",
            "/api/upload",
            Some(json!({
                "upload": { "name": "a.png", "size": 1, "filePath": "/x/a.png", "url": "https://x/a.png" },
                "parentId": folder_id
            })),
            Some(&intruder),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "PARENT_NOT_FOUND");
}

#[tokio::test]
async fn test_upload_auth_issues_signed_credentials() {
    let app = TestApp::new();
    let token = app.token_for("user_u");

    let response = app
        .request("GET", "/api/upload/auth", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["publicKey"], "public_test_key");
    assert_eq!(response.str_field("signature").len(), 40);
    assert!(!response.str_field("token").is_empty());
    assert!(response.body["expire"].as_i64().unwrap_or_default() > chrono::Utc::now().timestamp());

    let response = app.request("GET", "/api/upload/auth", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_components() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["nodeStore"]["name"], "memory");
    assert_eq!(response.body["blobStore"]["name"], "fake");
}

#[tokio::test]
async fn test_register_mismatched_user_wins_over_malformed_parent() {
    let app = TestApp::new();
    let token = app.token_for("user_u");

    let response = app
        .request(
            "POST",
            "/api/upload",
            Some(json!({
                "upload": { "name": "a.png", "size": 1, "filePath": "/x/a.png", "url": "https://x/a.png" },
                "parentId": "not-a-uuid",
                "userId": "user_v"
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(app.store.is_empty().await);
}
