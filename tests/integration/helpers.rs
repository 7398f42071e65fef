//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bytes::Bytes;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use folio_api::{AppState, build_app, build_state_with_storage};
use folio_core::config::AppConfig;
use folio_core::error::{AppError, ErrorKind};
use folio_core::result::AppResult;
use folio_core::traits::StorageProvider;
use folio_database::DatabasePool;
use folio_database::migration::run_migrations;
use folio_storage::LocalStorageProvider;

/// Local storage that can be told to fail individual operations.
#[derive(Debug)]
pub struct FailingStorage {
    inner: LocalStorageProvider,
    pub fail_create_dir: AtomicBool,
    pub fail_rename: AtomicBool,
    pub fail_delete_dir: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl FailingStorage {
    pub fn new(inner: LocalStorageProvider) -> Self {
        Self {
            inner,
            fail_create_dir: AtomicBool::new(false),
            fail_rename: AtomicBool::new(false),
            fail_delete_dir: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
        }
    }

    fn check(flag: &AtomicBool, op: &str) -> AppResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(AppError::new(
                ErrorKind::Storage,
                format!("simulated {op} failure"),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl StorageProvider for FailingStorage {
    fn provider_type(&self) -> &str {
        "failing"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn create_dir(&self, path: &str) -> AppResult<()> {
        Self::check(&self.fail_create_dir, "create_dir")?;
        self.inner.create_dir(path).await
    }

    async fn rename(&self, from: &str, to: &str) -> AppResult<()> {
        Self::check(&self.fail_rename, "rename")?;
        self.inner.rename(from, to).await
    }

    async fn delete_dir(&self, path: &str) -> AppResult<()> {
        Self::check(&self.fail_delete_dir, "delete_dir")?;
        self.inner.delete_dir(path).await
    }

    async fn all_files(&self, path: &str) -> AppResult<Vec<String>> {
        self.inner.all_files(path).await
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        self.inner.write(path, data).await
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        Self::check(&self.fail_delete, "delete")?;
        self.inner.delete(path).await
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        self.inner.exists(path).await
    }

    fn url(&self, path: &str) -> String {
        self.inner.url(path)
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for calling services directly
    pub state: AppState,
    /// Storage double used by the app
    pub storage: Arc<FailingStorage>,
    /// Holds the database file and storage root
    pub dir: TempDir,
}

impl TestApp {
    /// Create a new test application over a fresh database and storage root
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the default configuration
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.database.url = format!("sqlite://{}", dir.path().join("folio.db").display());
        config.storage.root_path = dir.path().join("storage").display().to_string();
        config.storage.public_url = "/storage".to_string();
        adjust(&mut config);

        let db_pool = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        run_migrations(db_pool.pool())
            .await
            .expect("Failed to run migrations");

        let local = LocalStorageProvider::new(&config.storage.root_path, &config.storage.public_url)
            .await
            .expect("Failed to init storage");
        let storage = Arc::new(FailingStorage::new(local));

        let state = build_state_with_storage(config, db_pool, storage.clone())
            .expect("Failed to build state");
        let router = build_app(state.clone());

        Self {
            router,
            state,
            storage,
            dir,
        }
    }

    /// Storage root on disk
    pub fn storage_root(&self) -> PathBuf {
        self.dir.path().join("storage")
    }

    /// Whether a storage-relative path exists on disk
    pub fn stored(&self, relative: &str) -> bool {
        self.storage_root().join(Path::new(relative)).exists()
    }

    /// Make a JSON request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload a file through `POST /api/file`
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        data: &[u8],
        folder_id: Option<i64>,
    ) -> TestResponse {
        let boundary = "folio-test-boundary";
        let mut body = Vec::new();
        if let Some(folder_id) = folder_id {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"folder_id\"\r\n\r\n{folder_id}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/file")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Create a folder and return its `data` object
    pub async fn create_folder(&self, name: &str, parent: Option<&Value>) -> Value {
        let body = match parent {
            Some(parent) => serde_json::json!({
                "name": name,
                "parent_id": parent["id"],
                "parent_folder": parent["path"],
            }),
            None => serde_json::json!({ "name": name }),
        };
        let response = self.request("POST", "/api/folder", Some(body)).await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["data"].clone()
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

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Set a failure flag on the storage double
pub fn fail(flag: &AtomicBool) {
    flag.store(true, Ordering::SeqCst);
}
