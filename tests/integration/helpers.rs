//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tower::ServiceExt;

use dropvault_api::AppState;
use dropvault_auth::{JwtDecoder, SessionClaims};
use dropvault_core::config::AppConfig;
use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;
use dropvault_core::traits::{BlobStore, BlobUpload, StoredBlob};
use dropvault_database::NodeStore;
use dropvault_database::repositories::MemoryNodeRepository;
use dropvault_storage::UploadSigner;

/// Secret the test identity provider signs session tokens with.
pub const TEST_SECRET: &str = "integration-test-secret";

const BOUNDARY: &str = "dropvault-test-boundary";

/// How the fake blob store answers uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobMode {
    /// Store and return a URL and path.
    Accept,
    /// Never answer.
    Hang,
    /// Fail with a provider error.
    Reject,
}

/// Blob store double that records every upload it receives.
#[derive(Debug)]
pub struct FakeBlobStore {
    mode: BlobMode,
    uploads: Mutex<Vec<BlobUpload>>,
}

impl FakeBlobStore {
    pub fn new(mode: BlobMode) -> Self {
        Self {
            mode,
            uploads: Mutex::new(Vec::new()),
        }
    }

    /// Uploads received so far.
    pub fn uploads(&self) -> Vec<BlobUpload> {
        self.uploads.lock().expect("lock").clone()
    }
}

#[async_trait]
impl BlobStore for FakeBlobStore {
    fn provider_type(&self) -> &str {
        "fake"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn store(&self, upload: BlobUpload) -> AppResult<StoredBlob> {
        self.uploads.lock().expect("lock").push(upload.clone());
        match self.mode {
            BlobMode::Accept => {
                let path = format!("{}/{}", upload.folder, upload.file_name);
                Ok(StoredBlob {
                    url: Some(format!("https://cdn.test{path}")),
                    path: Some(path),
                    size: upload.data.len() as u64,
                    mime_type: upload.content_type,
                    thumbnail_url: None,
                })
            }
            BlobMode::Hang => std::future::pending().await,
            BlobMode::Reject => Err(AppError::external("provider rejected the upload")),
        }
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Metadata store behind the router
    pub store: Arc<MemoryNodeRepository>,
    /// Blob store behind the router
    pub blobs: Arc<FakeBlobStore>,
}

impl TestApp {
    /// Create a new test application with an accepting blob store
    pub fn new() -> Self {
        Self::with_blob_mode(BlobMode::Accept)
    }

    /// Create a new test application whose blob store behaves as `mode`
    pub fn with_blob_mode(mode: BlobMode) -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = TEST_SECRET.to_string();
        config.upload.max_file_size_bytes = 1024 * 1024;
        config.storage.timeout_seconds = 5;
        config.storage.imagekit.public_key = "public_test_key".to_string();
        config.storage.imagekit.private_key = "private_test_key".to_string();

        let store = Arc::new(MemoryNodeRepository::new());
        let blobs = Arc::new(FakeBlobStore::new(mode));
        let identity = Arc::new(JwtDecoder::new(&config.auth));
        let signer = UploadSigner::from_config(&config.storage).expect("signer");

        let state = AppState::new(
            config,
            identity,
            Arc::clone(&store) as Arc<dyn NodeStore>,
            Arc::clone(&blobs) as Arc<dyn BlobStore>,
            Some(signer),
        );

        Self {
            router: dropvault_api::build_app(state),
            store,
            blobs,
        }
    }

    /// Session token for `user_id`, signed like the identity provider would
    pub fn token_for(&self, user_id: &str) -> String {
        sign_token(user_id, TEST_SECRET, 3600)
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Make a multipart upload to `/api/files/upload`
    pub async fn upload(&self, form: MultipartForm, token: Option<&str>) -> TestResponse {
        let mut req = Request::builder()
            .method("POST")
            .uri("/api/files/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(form.into_body()))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Create a folder and return its id
    pub async fn create_folder(&self, token: &str, name: &str, parent_id: Option<&str>) -> String {
        let response = self
            .request(
                "POST",
                "/api/folder/create",
                Some(serde_json::json!({ "name": name, "parentId": parent_id })),
                Some(token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Folder create failed: {:?}",
            response.body
        );

        response.str_field("id").to_string()
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// HS256 token with `sub = user_id`, expiring `ttl_seconds` from now
pub fn sign_token(user_id: &str, secret: &str, ttl_seconds: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        sub: user_id.to_string(),
        exp: now + ttl_seconds,
        iat: Some(now),
        iss: None,
        sid: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign token")
}

/// Hand-built `multipart/form-data` body
#[derive(Debug, Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain text field
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    /// Add a file field
    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn into_body(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// String field of a JSON object body
    pub fn str_field(&self, key: &str) -> &str {
        self.body
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("No string field '{key}' in {:?}", self.body))
    }

    /// Machine-readable error code of an error body
    pub fn error_code(&self) -> &str {
        self.str_field("code")
    }

    /// Items of a JSON array body
    pub fn items(&self) -> &Vec<Value> {
        self.body
            .as_array()
            .unwrap_or_else(|| panic!("Expected an array body, got {:?}", self.body))
    }
}
