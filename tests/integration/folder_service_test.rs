//! Storage failures must leave the database untouched, and concurrent
//! writers must not share a slug.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use folio_core::error::ErrorKind;
use folio_service::folder::FolderInput;

use helpers::{TestApp, fail};

#[tokio::test]
async fn test_create_failure_leaves_no_row() {
    let app = TestApp::new().await;
    fail(&app.storage.fail_create_dir);

    let err = app
        .state
        .folder_service
        .create(FolderInput {
            name: "Broken".to_string(),
            ..FolderInput::default()
        })
        .await
        .expect_err("create should fail");
    assert_eq!(err.kind, ErrorKind::Storage);

    let folders = app.state.folder_service.list(None).await.expect("list");
    assert!(folders.is_empty());
}

#[tokio::test]
async fn test_failed_mutation_returns_generic_envelope() {
    let app = TestApp::new().await;
    fail(&app.storage.fail_create_dir);

    let response = app
        .request("POST", "/api/folder", Some(json!({ "name": "Broken" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "Something went wrong, please try again later."
    );
    assert_eq!(response.body["error"], "simulated create_dir failure");
}

#[tokio::test]
async fn test_failure_detail_hidden_when_configured() {
    let app = TestApp::with_config(|config| config.server.expose_error_details = false).await;
    fail(&app.storage.fail_create_dir);

    let response = app
        .request("POST", "/api/folder", Some(json!({ "name": "Broken" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "STORAGE");
}

#[tokio::test]
async fn test_rename_failure_keeps_folder_unchanged() {
    let app = TestApp::new().await;

    let folder = app.create_folder("Originals", None).await;
    let child = app.create_folder("Raw", Some(&folder)).await;
    let id = folder["id"].as_i64().expect("id");
    fail(&app.storage.fail_rename);

    let response = app
        .request("POST", &format!("/api/folder/{id}"), Some(json!({ "name": "Edited" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let stored = app.state.folder_service.get_folder(id).await.expect("folder");
    assert_eq!(stored.name, "Originals");
    assert_eq!(stored.slug, "originals");

    let child_id = child["id"].as_i64().expect("id");
    let stored_child = app
        .state
        .folder_service
        .get_folder(child_id)
        .await
        .expect("child");
    assert_eq!(stored_child.parent_folder.as_deref(), Some("originals"));
    assert!(app.stored("originals/raw"));
    assert!(!app.stored("edited"));
}

#[tokio::test]
async fn test_delete_failure_keeps_rows() {
    let app = TestApp::new().await;

    let folder = app.create_folder("Keepsakes", None).await;
    fail(&app.storage.fail_delete_dir);

    let response = app
        .request(
            "DELETE",
            "/api/folder",
            Some(json!({ "folder_names": "keepsakes", "folder_ids": [folder["id"]] })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let folders = app.state.folder_service.list(None).await.expect("list");
    assert_eq!(folders.len(), 1);
    assert!(app.stored("keepsakes"));
}

#[tokio::test]
async fn test_file_delete_failure_keeps_row() {
    let app = TestApp::new().await;

    let upload = app.upload("keep.txt", "text/plain", b"keep", None).await;
    let file_id = upload.body["data"]["id"].as_i64().expect("id");
    fail(&app.storage.fail_delete);

    let response = app
        .request("DELETE", &format!("/api/file/{file_id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    app.storage
        .fail_delete
        .store(false, std::sync::atomic::Ordering::SeqCst);
    let response = app
        .request("DELETE", &format!("/api/file/{file_id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_slugs() {
    let app = TestApp::new().await;

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let service = app.state.folder_service.clone();
            tokio::spawn(async move {
                service
                    .create(FolderInput {
                        name: "Race".to_string(),
                        ..FolderInput::default()
                    })
                    .await
            })
        })
        .collect();

    let mut slugs = Vec::new();
    for task in tasks {
        let folder = task.await.expect("join").expect("create");
        slugs.push(folder.slug);
    }
    slugs.sort();
    slugs.dedup();
    assert_eq!(slugs.len(), 8, "{slugs:?}");
    assert!(slugs.iter().any(|s| s == "race"));
    for slug in &slugs {
        assert!(app.stored(slug), "missing directory {slug}");
    }
}
