//! Integration tests for version history resolution.

use axum::http::StatusCode;
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;

use assethub_core::types::id::{FileId, ProjectId};
use assethub_entity::file::File;

use crate::helpers::{TestApp, id_of};

/// Upload a root and two revisions; return the ids oldest first.
async fn three_versions(app: &TestApp) -> Vec<String> {
    let v1 = id_of(&app.upload(ProjectId::new(), None, "cube.obj").await);
    let v2 = app.revise(&v1, "blob://2").await.field("id").to_string();
    let v3 = app.revise(&v2, "blob://3").await.field("id").to_string();
    vec![v1, v2, v3]
}

fn planted(id: FileId, previous: Option<FileId>, chain_id: FileId, version: i32, latest: bool) -> File {
    File {
        id,
        name: "broken.obj".to_string(),
        project_id: ProjectId::new(),
        directory_id: None,
        size_bytes: 1,
        content_ref: format!("blob://{id}"),
        mime_type: None,
        is_latest: latest,
        previous_version_id: previous,
        chain_id,
        version_number: version,
        uploaded_by: None,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_versions_are_the_same_from_any_member() {
    let app = TestApp::new();
    let ids = three_versions(&app).await;

    for id in &ids {
        let response = app
            .request("GET", &format!("/api/files/{id}/versions"), None, None)
            .await;
        assert_eq!(response.status, StatusCode::OK);

        let chain: Vec<&str> = response
            .items()
            .iter()
            .filter_map(|f| f["id"].as_str())
            .collect();
        assert_eq!(chain, ids.iter().map(String::as_str).collect::<Vec<_>>());

        let numbers: Vec<i64> = response
            .items()
            .iter()
            .filter_map(|f| f["version_number"].as_i64())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}

#[tokio::test]
async fn test_latest_from_any_member() {
    let app = TestApp::new();
    let ids = three_versions(&app).await;

    for id in &ids {
        let response = app
            .request("GET", &format!("/api/files/{id}/latest"), None, None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.field("id"), ids[2]);
        assert_eq!(response.body["data"]["is_latest"], json!(true));
    }
}

#[tokio::test]
async fn test_single_version_chain() {
    let app = TestApp::new();
    let only = id_of(&app.upload(ProjectId::new(), None, "cube.obj").await);

    let versions = app
        .request("GET", &format!("/api/files/{only}/versions"), None, None)
        .await;
    assert_eq!(versions.items().len(), 1);

    let latest = app
        .request("GET", &format!("/api/files/{only}/latest"), None, None)
        .await;
    assert_eq!(latest.field("id"), only);
}

#[tokio::test]
async fn test_unknown_file_history() {
    let app = TestApp::new();

    let response = app
        .request(
            "GET",
            &format!("/api/files/{}/versions", FileId::new()),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dangling_predecessor_is_not_found() {
    let app = TestApp::new();
    let ids = three_versions(&app).await;
    let middle: FileId = ids[1].parse().expect("valid id");
    app.store.evict_file(middle).await;

    let response = app
        .request("GET", &format!("/api/files/{}/versions", ids[2]), None, None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_branched_chain_is_reported_as_corruption() {
    let app = TestApp::new();
    let root = FileId::new();
    let left = FileId::new();
    let right = FileId::new();
    app.store.import_file(planted(root, None, root, 1, false)).await;
    app.store.import_file(planted(left, Some(root), root, 2, true)).await;
    app.store.import_file(planted(right, Some(root), root, 2, true)).await;

    let response = app
        .request("GET", &format!("/api/files/{left}/versions"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error_code(), "DATA_CORRUPTION");
}

#[tokio::test]
async fn test_cycle_is_reported_as_corruption() {
    let app = TestApp::new();
    let a = FileId::new();
    let b = FileId::new();
    app.store.import_file(planted(a, Some(b), a, 1, false)).await;
    app.store.import_file(planted(b, Some(a), a, 2, true)).await;

    let response = app
        .request("GET", &format!("/api/files/{a}/latest"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error_code(), "DATA_CORRUPTION");
}

#[tokio::test]
async fn test_chain_without_latest_is_reported_as_corruption() {
    let app = TestApp::new();
    let root = FileId::new();
    let next = FileId::new();
    app.store.import_file(planted(root, None, root, 1, false)).await;
    app.store.import_file(planted(next, Some(root), root, 2, false)).await;

    let versions = app
        .request("GET", &format!("/api/files/{root}/versions"), None, None)
        .await;
    assert_eq!(versions.status, StatusCode::OK);

    let latest = app
        .request("GET", &format!("/api/files/{root}/latest"), None, None)
        .await;
    assert_eq!(latest.error_code(), "DATA_CORRUPTION");
}
