//! Integration tests for the file endpoints.

mod helpers;

use axum::http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_upload_into_folder() {
    let app = TestApp::new().await;

    let folder = app.create_folder("Photos", None).await;
    let folder_id = folder["id"].as_i64().expect("id");

    let response = app
        .upload("Beach Day.JPG", "image/jpeg", &[0xff, 0xd8, 0xff, 0xe0], Some(folder_id))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["message"], "File uploaded successfully.");

    let file = &response.body["data"];
    assert_eq!(file["name"], "Beach Day.JPG");
    assert_eq!(file["slug"], "beach-day");
    assert_eq!(file["mime_type"], "image/jpeg");
    assert_eq!(file["size"], 4);
    assert_eq!(file["size_human"], "4 B");
    assert_eq!(file["folder_id"], folder_id);

    let path = file["path"].as_str().expect("path");
    assert!(path.starts_with("photos/"), "{path}");
    assert!(path.ends_with(".jpg"), "{path}");
    assert_eq!(file["url"], format!("/storage/{path}").as_str());

    let on_disk = std::fs::read(app.storage_root().join(path)).expect("stored file");
    assert_eq!(on_disk, vec![0xff, 0xd8, 0xff, 0xe0]);
}

#[tokio::test]
async fn test_upload_to_root_guesses_mime_from_name() {
    let app = TestApp::new().await;

    let response = app
        .upload("manual.pdf", "application/octet-stream", b"%PDF-1.4", None)
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let file = &response.body["data"];
    assert_eq!(file["mime_type"], "application/pdf");
    assert!(file["folder_id"].is_null());
    let path = file["path"].as_str().expect("path");
    assert!(!path.contains('/'), "{path}");
    assert!(app.stored(path));
}

#[tokio::test]
async fn test_upload_without_file_field_is_rejected() {
    let app = TestApp::new().await;

    let body = "--b\r\nContent-Disposition: form-data; name=\"folder_id\"\r\n\r\n1\r\n--b--\r\n";
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/file")
        .header("Content-Type", "multipart/form-data; boundary=b")
        .body(axum::body::Body::from(body))
        .expect("request");
    let response = tower::ServiceExt::oneshot(app.router.clone(), req)
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_upload_into_unknown_folder_is_rejected() {
    let app = TestApp::new().await;

    let response = app.upload("a.txt", "text/plain", b"a", Some(404)).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let leftovers = std::fs::read_dir(app.storage_root())
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn test_upload_over_size_limit_is_rejected() {
    let app = TestApp::with_config(|config| config.storage.max_upload_size_bytes = 8).await;

    let response = app
        .upload("big.txt", "text/plain", b"more than eight bytes", None)
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["message"], "The file may not be greater than 8 B.");
}

#[tokio::test]
async fn test_delete_file_removes_object() {
    let app = TestApp::new().await;

    let folder = app.create_folder("Scans", None).await;
    let folder_id = folder["id"].as_i64().expect("id");
    let upload = app
        .upload("receipt.txt", "text/plain", b"paid", Some(folder_id))
        .await;
    let file_id = upload.body["data"]["id"].as_i64().expect("id");
    let path = upload.body["data"]["path"].as_str().expect("path").to_string();
    assert!(app.stored(&path));

    let response = app
        .request("DELETE", &format!("/api/file/{file_id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["message"], "File deleted successfully.");
    assert!(!app.stored(&path));
    assert!(app.stored("scans"));

    let listing = app
        .request("GET", &format!("/api/folder/{folder_id}"), None)
        .await;
    assert_eq!(listing.body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_delete_unknown_file_is_not_found() {
    let app = TestApp::new().await;

    let response = app.request("DELETE", "/api/file/31337", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("DELETE", "/api/file/abc", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
