//! Route definitions for the DropVault HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to every handler via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room for multipart boundaries and the small text fields next to the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the Axum router with all routes and their body limits.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.upload.max_file_size_bytes as usize + MULTIPART_OVERHEAD_BYTES;

    let api_routes = Router::new()
        .merge(file_routes(max_upload))
        .merge(folder_routes())
        .merge(upload_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Multipart upload and listing
fn file_routes(max_upload: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/files/upload",
            post(handlers::file::simple_upload).layer(DefaultBodyLimit::max(max_upload)),
        )
        .route("/files", get(handlers::file::list_files))
}

/// Folder creation
fn folder_routes() -> Router<AppState> {
    Router::new().route("/folder/create", post(handlers::folder::create_folder))
}

/// Direct-to-provider uploads
fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(handlers::upload::register_upload))
        .route("/upload/auth", get(handlers::upload::upload_auth))
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
