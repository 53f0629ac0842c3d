//! Integration tests for file chains and revisions.

use axum::http::StatusCode;
use futures::future::join_all;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use assethub_core::types::id::ProjectId;

use crate::helpers::{TestApp, id_of};

fn versions_of(items: &[Value]) -> Vec<i64> {
    let mut versions: Vec<i64> = items
        .iter()
        .filter_map(|f| f["version_number"].as_i64())
        .collect();
    versions.sort_unstable();
    versions
}

#[tokio::test]
async fn test_latest_only_listing_hides_superseded_versions() {
    let app = TestApp::new();
    let project = ProjectId::new();
    let models = id_of(&app.create_directory(project, None, "Models").await);

    let v1 = app.upload(project, Some(&models), "cube.obj").await;
    assert_eq!(v1["version_number"], json!(1));
    assert_eq!(v1["is_latest"], json!(true));
    assert!(v1["previous_version_id"].is_null());
    let v1_id = id_of(&v1);

    let v2 = app.revise(&v1_id, "blob://cube.obj/2").await;
    assert_eq!(v2.status, StatusCode::CREATED);
    assert_eq!(v2.body["data"]["version_number"], json!(2));
    assert_eq!(v2.body["data"]["name"], json!("cube.obj"));
    assert_eq!(v2.body["data"]["directory_id"], json!(models));
    assert_eq!(v2.field("previous_version_id"), v1_id);
    assert_eq!(v2.field("chain_id"), v1_id);

    let base = format!("/api/files?project={project}&directory={models}");

    let latest = app.request("GET", &base, None, None).await;
    assert_eq!(latest.status, StatusCode::OK);
    assert_eq!(versions_of(latest.items()), vec![2]);
    assert_eq!(latest.items()[0]["is_latest"], json!(true));

    let explicit = app
        .request("GET", &format!("{base}&latest_only=TRUE"), None, None)
        .await;
    assert_eq!(versions_of(explicit.items()), vec![2]);

    for off in ["false", "0", "yes"] {
        let everything = app
            .request("GET", &format!("{base}&latest_only={off}"), None, None)
            .await;
        assert_eq!(versions_of(everything.items()), vec![1, 2], "latest_only={off}");
    }

    let old = app
        .request("GET", &format!("/api/files/{v1_id}"), None, None)
        .await;
    assert_eq!(old.body["data"]["is_latest"], json!(false));
}

#[tokio::test]
async fn test_directory_null_scopes_to_project_root() {
    let app = TestApp::new();
    let project = ProjectId::new();
    let models = id_of(&app.create_directory(project, None, "Models").await);
    app.upload(project, None, "readme.txt").await;
    app.upload(project, Some(&models), "cube.obj").await;

    let root = app
        .request(
            "GET",
            &format!("/api/files?project={project}&directory=null"),
            None,
            None,
        )
        .await;
    assert_eq!(root.items().len(), 1);
    assert_eq!(root.items()[0]["name"], json!("readme.txt"));

    let any = app
        .request("GET", &format!("/api/files?project={project}"), None, None)
        .await;
    assert_eq!(any.items().len(), 2);
}

#[tokio::test]
async fn test_blank_directory_filter_lists_everywhere() {
    let app = TestApp::new();
    let project = ProjectId::new();
    let models = id_of(&app.create_directory(project, None, "Models").await);
    app.upload(project, None, "readme.txt").await;
    app.upload(project, Some(&models), "cube.obj").await;

    let response = app
        .request(
            "GET",
            &format!("/api/files?project={project}&directory="),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.items().len(), 2);
}

#[tokio::test]
async fn test_list_requires_project() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/files?latest_only=true", None, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stale_revision_conflicts() {
    let app = TestApp::new();
    let project = ProjectId::new();
    let v1 = id_of(&app.upload(project, None, "cube.obj").await);
    assert_eq!(app.revise(&v1, "blob://2").await.status, StatusCode::CREATED);

    let stale = app.revise(&v1, "blob://2b").await;

    assert_eq!(stale.status, StatusCode::CONFLICT);
    assert_eq!(stale.error_code(), "CONFLICT");
    assert_eq!(stale.body["retryable"], json!(true));
}

#[tokio::test]
async fn test_concurrent_revisions_have_one_winner() {
    let app = TestApp::new();
    let project = ProjectId::new();
    let v1 = id_of(&app.upload(project, None, "cube.obj").await);

    let attempts = (0..8).map(|i| {
        let app = &app;
        let v1 = v1.clone();
        async move { app.revise(&v1, &format!("blob://racer/{i}")).await.status }
    });
    let statuses = join_all(attempts).await;

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let conflicts = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!((created, conflicts), (1, 7));

    let latest = app
        .request("GET", &format!("/api/files?project={project}"), None, None)
        .await;
    assert_eq!(versions_of(latest.items()), vec![2]);
}

#[tokio::test]
async fn test_anonymous_file_writes_denied() {
    let app = TestApp::new();
    let project = ProjectId::new();

    let upload = app
        .request(
            "POST",
            "/api/files",
            Some(json!({ "name": "cube.obj", "project": project, "size": 1, "content_ref": "blob://x" })),
            None,
        )
        .await;
    assert_eq!(upload.status, StatusCode::UNAUTHORIZED);

    let v1 = id_of(&app.upload(project, None, "cube.obj").await);
    let revise = app
        .request(
            "POST",
            &format!("/api/files/{v1}/revisions"),
            Some(json!({ "size": 1, "content_ref": "blob://y" })),
            None,
        )
        .await;
    assert_eq!(revise.status, StatusCode::UNAUTHORIZED);

    let delete = app
        .request("DELETE", &format!("/api/files/{v1}"), None, None)
        .await;
    assert_eq!(delete.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_validation() {
    let app = TestApp::new();
    let project = ProjectId::new();

    let negative = app
        .request(
            "POST",
            "/api/files",
            Some(json!({ "name": "cube.obj", "project": project, "size": -1, "content_ref": "blob://x" })),
            Some(&app.token),
        )
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);

    let missing_dir = app
        .request(
            "POST",
            "/api/files",
            Some(json!({
                "name": "cube.obj",
                "project": project,
                "directory": "00000000-0000-0000-0000-999999999999",
                "size": 1,
                "content_ref": "blob://x",
            })),
            Some(&app.token),
        )
        .await;
    assert_eq!(missing_dir.status, StatusCode::NOT_FOUND);

    let foreign = id_of(&app.create_directory(ProjectId::new(), None, "Theirs").await);
    let cross_project = app
        .request(
            "POST",
            "/api/files",
            Some(json!({
                "name": "cube.obj",
                "project": project,
                "directory": foreign,
                "size": 1,
                "content_ref": "blob://x",
            })),
            Some(&app.token),
        )
        .await;
    assert_eq!(cross_project.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_revise_unknown_file() {
    let app = TestApp::new();

    let response = app
        .revise("00000000-0000-0000-0000-999999999999", "blob://x")
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_file_id_is_validation_error() {
    let app = TestApp::new();

    for path in [
        "/api/files/not-a-uuid",
        "/api/files/not-a-uuid/versions",
        "/api/files/not-a-uuid/latest",
    ] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(response.error_code(), "VALIDATION_ERROR", "{path}");
        assert_eq!(response.body["retryable"], json!(false));
    }
}

#[tokio::test]
async fn test_delete_removes_whole_chain() {
    let app = TestApp::new();
    let project = ProjectId::new();
    let v1 = id_of(&app.upload(project, None, "cube.obj").await);
    let v2 = app.revise(&v1, "blob://2").await;
    let v2_id = v2.field("id").to_string();
    let v3 = app.revise(&v2_id, "blob://3").await;
    assert_eq!(v3.status, StatusCode::CREATED);

    let deleted = app
        .request("DELETE", &format!("/api/files/{v2_id}"), None, Some(&app.token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["versions"], json!(3));

    let listing = app
        .request(
            "GET",
            &format!("/api/files?project={project}&latest_only=false"),
            None,
            None,
        )
        .await;
    assert!(listing.items().is_empty());
}
