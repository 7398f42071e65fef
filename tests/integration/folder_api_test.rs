//! Integration tests for the folder endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_create_root_and_child_folders() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/folder", Some(json!({ "name": "Annual Reports" })))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Folder created successfully.");
    let root = response.body["data"].clone();
    assert_eq!(root["name"], "Annual Reports");
    assert_eq!(root["slug"], "annual-reports");
    assert_eq!(root["path"], "annual-reports");
    assert!(root["parent_id"].is_null());
    assert!(root["created_at"].is_string());
    assert!(app.stored("annual-reports"));

    let child = app.create_folder("Q1 Numbers", Some(&root)).await;
    assert_eq!(child["parent_id"], root["id"]);
    assert_eq!(child["parent_folder"], "annual-reports");
    assert_eq!(child["path"], "annual-reports/q1-numbers");
    assert!(app.stored("annual-reports/q1-numbers"));
}

#[tokio::test]
async fn test_duplicate_names_get_numbered_slugs() {
    let app = TestApp::new().await;

    let first = app.create_folder("My Folder", None).await;
    let second = app.create_folder("My Folder", None).await;
    let third = app.create_folder("my folder", None).await;

    assert_eq!(first["slug"], "my-folder");
    assert_eq!(second["slug"], "my-folder-1");
    assert_eq!(third["slug"], "my-folder-2");
    assert!(app.stored("my-folder-1"));
    assert!(app.stored("my-folder-2"));
}

#[tokio::test]
async fn test_create_rejects_blank_name() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/folder", Some(json!({ "name": "   " })))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["message"], "The name field is required.");
    assert!(response.body["errors"]["name"].is_array());
}

#[tokio::test]
async fn test_create_rejects_unknown_or_mismatched_parent() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/folder",
            Some(json!({ "name": "Orphan", "parent_id": 999, "parent_folder": "nowhere" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["errors"].is_null());

    let parent = app.create_folder("Parent", None).await;
    let response = app
        .request(
            "POST",
            "/api/folder",
            Some(json!({ "name": "Child", "parent_id": parent["id"], "parent_folder": "other" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!app.stored("parent/child"));
}

#[tokio::test]
async fn test_parent_folder_without_parent_id_is_ignored() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/folder",
            Some(json!({ "name": "Loose", "parent_folder": "stale" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let folder = response.body["data"].clone();
    assert_eq!(folder["path"], "loose");
    assert!(folder["parent_id"].is_null());
    assert!(folder["parent_folder"].is_null());
    assert!(app.stored("loose"));
    assert!(!app.stored("stale"));
}

#[tokio::test]
async fn test_list_returns_newest_roots_with_children() {
    let app = TestApp::new().await;

    let alpha = app.create_folder("Alpha", None).await;
    app.create_folder("Beta", None).await;
    app.create_folder("Gamma", None).await;
    app.create_folder("Inside Alpha", Some(&alpha)).await;

    let response = app.request("GET", "/api/folder?limit=2", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let data = response.body["data"].as_array().expect("data array");
    let names: Vec<&str> = data.iter().filter_map(|f| f["name"].as_str()).collect();
    assert_eq!(names, vec!["Gamma", "Beta"]);

    let response = app.request("GET", "/api/folder", None).await;
    let data = response.body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 3, "child folders are not listed at the top level");
    let alpha = data
        .iter()
        .find(|f| f["slug"] == "alpha")
        .expect("alpha listed");
    assert_eq!(alpha["children_count"], 1);
    assert_eq!(alpha["files_count"], 0);
    assert_eq!(alpha["children"][0]["slug"], "inside-alpha");
}

#[tokio::test]
async fn test_list_rejects_non_numeric_limit() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/folder?limit=lots", None).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_show_lists_folders_before_files() {
    let app = TestApp::new().await;

    let docs = app.create_folder("Docs", None).await;
    let drafts = app.create_folder("Drafts", Some(&docs)).await;
    let docs_id = docs["id"].as_i64().expect("id");
    let drafts_id = drafts["id"].as_i64().expect("id");

    let upload = app
        .upload("notes.txt", "text/plain", b"hello world", Some(docs_id))
        .await;
    assert_eq!(upload.status, StatusCode::OK, "{:?}", upload.body);
    app.upload("draft.md", "text/markdown", b"# draft", Some(drafts_id))
        .await;
    app.upload("cover.png", "image/png", &[0x89, 0x50, 0x4e, 0x47], Some(drafts_id))
        .await;

    let response = app.request("GET", &format!("/api/folder/{docs_id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"].as_array().expect("data array");
    assert_eq!(items.len(), 2);

    assert_eq!(items[0]["type"], "folder");
    assert_eq!(items[0]["slug"], "drafts");
    assert_eq!(items[0]["items"], 2);

    assert_eq!(items[1]["type"], "text");
    assert_eq!(items[1]["name"], "notes.txt");
    assert_eq!(items[1]["size"], "11 B");
    assert_eq!(items[1]["folder_id"], docs_id);
}

#[tokio::test]
async fn test_show_unknown_folder_is_not_found() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/folder/4242", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("GET", "/api/folder/not-a-number", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_renames_directory_and_rebases_contents() {
    let app = TestApp::new().await;

    let reports = app.create_folder("Reports", None).await;
    let q1 = app.create_folder("Q1", Some(&reports)).await;
    let q1_id = q1["id"].as_i64().expect("id");
    let upload = app
        .upload("summary.txt", "text/plain", b"totals", Some(q1_id))
        .await;
    let old_file_path = upload.body["data"]["path"].as_str().expect("path").to_string();
    assert!(old_file_path.starts_with("reports/q1/"));

    let reports_id = reports["id"].as_i64().expect("id");
    let response = app
        .request(
            "POST",
            &format!("/api/folder/{reports_id}"),
            Some(json!({ "name": "Archive" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["message"], "Folder updated successfully.");
    assert_eq!(response.body["data"]["slug"], "archive");
    assert_eq!(response.body["data"]["path"], "archive");

    assert!(!app.stored("reports"));
    assert!(app.stored("archive/q1"));

    let listing = app.request("GET", &format!("/api/folder/{q1_id}"), None).await;
    let file = &listing.body["data"][0];
    let new_file_path = old_file_path.replacen("reports/", "archive/", 1);
    assert_eq!(file["path"], new_file_path.as_str());
    assert_eq!(file["url"], format!("/storage/{new_file_path}").as_str());
    assert!(app.stored(&new_file_path));

    let listing = app
        .request("GET", &format!("/api/folder/{reports_id}"), None)
        .await;
    assert_eq!(listing.body["data"][0]["parent_folder"], "archive");
}

#[tokio::test]
async fn test_update_keeps_slug_when_name_is_unchanged() {
    let app = TestApp::new().await;

    let folder = app.create_folder("Invoices", None).await;
    let id = folder["id"].as_i64().expect("id");

    let response = app
        .request("POST", &format!("/api/folder/{id}"), Some(json!({ "name": "Invoices" })))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["slug"], "invoices");
    assert!(app.stored("invoices"));
}

#[tokio::test]
async fn test_update_moves_folder_under_new_parent() {
    let app = TestApp::new().await;

    let inbox = app.create_folder("Inbox", None).await;
    let done = app.create_folder("Done", None).await;
    let id = inbox["id"].as_i64().expect("id");

    let response = app
        .request(
            "POST",
            &format!("/api/folder/{id}"),
            Some(json!({ "name": "Inbox", "parent_id": done["id"], "parent_folder": "done" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["path"], "done/inbox");
    assert!(app.stored("done/inbox"));
    assert!(!app.stored("inbox"));
}

#[tokio::test]
async fn test_update_rejects_move_into_descendant() {
    let app = TestApp::new().await;

    let outer = app.create_folder("Outer", None).await;
    let inner = app.create_folder("Inner", Some(&outer)).await;
    let outer_id = outer["id"].as_i64().expect("id");

    let response = app
        .request(
            "POST",
            &format!("/api/folder/{outer_id}"),
            Some(json!({ "name": "Outer", "parent_id": inner["id"], "parent_folder": inner["path"] })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.stored("outer/inner"));
}

#[tokio::test]
async fn test_update_unknown_folder_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/folder/77", Some(json!({ "name": "Ghost" })))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_single_name_removes_directory_and_rows() {
    let app = TestApp::new().await;

    let music = app.create_folder("Music", None).await;
    app.create_folder("Jazz", Some(&music)).await;

    let response = app
        .request(
            "DELETE",
            "/api/folder",
            Some(json!({ "folder_names": "music", "folder_ids": [music["id"]] })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["message"], "Folder deleted successfully.");
    assert_eq!(response.body["deleted"], 1);
    assert!(!app.stored("music"));

    let response = app.request("GET", "/api/folder", None).await;
    assert_eq!(response.body["data"], json!([]));
    assert_eq!(app.state.folder_service.list(None).await.expect("list").len(), 0);
}

#[tokio::test]
async fn test_delete_many_names() {
    let app = TestApp::new().await;

    let a = app.create_folder("A", None).await;
    let b = app.create_folder("B", None).await;
    let keep = app.create_folder("Keep", None).await;

    let response = app
        .request(
            "DELETE",
            "/api/folder",
            Some(json!({ "folder_names": ["a", "b"], "folder_ids": [a["id"], b["id"]] })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["deleted"], 2);
    assert!(!app.stored("a"));
    assert!(!app.stored("b"));
    assert!(app.stored("keep"));

    let response = app.request("GET", "/api/folder", None).await;
    let data = response.body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], keep["id"]);
}

#[tokio::test]
async fn test_delete_requires_names_and_ids() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "DELETE",
            "/api/folder",
            Some(json!({ "folder_names": [], "folder_ids": [] })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["errors"]["folder_names"].is_array());
    assert!(response.body["errors"]["folder_ids"].is_array());
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "ok");
    assert_eq!(response.body["storage"], "ok");
}

#[tokio::test]
async fn test_routes_follow_configured_prefix() {
    let app = TestApp::with_config(|config| config.server.api_prefix = "/v2/".to_string()).await;

    let response = app.request("GET", "/v2/health", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
