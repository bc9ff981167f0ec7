//! Integration tests for folder listings.

use http::StatusCode;

use crate::helpers::{MultipartForm, TestApp};

#[tokio::test]
async fn test_root_listing_puts_folders_first() {
    let app = TestApp::new();
    let token = app.token_for("user_u");

    app.upload(
        MultipartForm::new().file("file", "alpha.png", "image/png", b"png"),
        Some(&token),
    )
    .await;
    app.create_folder(&token, "Zeta", None).await;
    app.create_folder(&token, "Beta", None).await;

    let response = app.request("GET", "/api/files", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response
        .items()
        .iter()
        .filter_map(|n| n["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Beta", "Zeta", "alpha.png"]);
}

#[tokio::test]
async fn test_listing_is_scoped_to_folder_and_owner() {
    let app = TestApp::new();
    let owner = app.token_for("user_u");
    let other = app.token_for("user_v");

    let docs = app.create_folder(&owner, "Docs", None).await;
    app.create_folder(&owner, "Inner", Some(&docs)).await;
    app.create_folder(&other, "Theirs", None).await;

    let response = app
        .request("GET", &format!("/api/files?parentId={docs}"), None, Some(&owner))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.items().len(), 1);
    assert_eq!(response.items()[0]["name"], "Inner");
    assert_eq!(response.items()[0]["path"], "/Docs/Inner");

    let response = app.request("GET", "/api/files", None, Some(&owner)).await;
    assert_eq!(response.items().len(), 1);
    assert_eq!(response.items()[0]["name"], "Docs");

    // Another user's folder id lists as empty rather than erroring.
    let response = app
        .request("GET", &format!("/api/files?parentId={docs}"), None, Some(&other))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.items().is_empty());
}

#[tokio::test]
async fn test_blank_parent_lists_root() {
    let app = TestApp::new();
    let token = app.token_for("user_u");
    app.create_folder(&token, "Docs", None).await;

    let response = app
        .request("GET", "/api/files?parentId=", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.items().len(), 1);
}

#[tokio::test]
async fn test_listing_errors() {
    let app = TestApp::new();
    let token = app.token_for("user_u");

    let response = app
        .request("GET", "/api/files?parentId=nope", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.request("GET", "/api/files", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
