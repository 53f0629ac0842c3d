//! Integration tests for the directory tree.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use assethub_core::config::PolicyConfig;
use assethub_core::types::id::ProjectId;

use crate::helpers::{TestApp, id_of, sorted_names};

#[tokio::test]
async fn test_parent_filter_distinguishes_top_level_from_any() {
    let app = TestApp::new();
    let project = ProjectId::new();
    let assets = app.create_directory(project, None, "Assets").await;
    let assets_id = id_of(&assets);
    app.create_directory(project, Some(&assets_id), "Models").await;
    app.create_directory(ProjectId::new(), None, "Elsewhere").await;

    let top = app
        .request(
            "GET",
            &format!("/api/directories?project={project}&parent=null"),
            None,
            None,
        )
        .await;
    assert_eq!(top.status, StatusCode::OK);
    assert_eq!(sorted_names(top.items()), vec!["Assets"]);

    let children = app
        .request(
            "GET",
            &format!("/api/directories?project={project}&parent={assets_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(sorted_names(children.items()), vec!["Models"]);
    assert_eq!(children.items()[0]["parent_id"], json!(assets_id));

    let all = app
        .request("GET", &format!("/api/directories?project={project}"), None, None)
        .await;
    assert_eq!(sorted_names(all.items()), vec!["Assets", "Models"]);
}

#[tokio::test]
async fn test_list_requires_project() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/directories", None, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_parent_filter_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "GET",
            &format!("/api/directories?project={}&parent=banana", ProjectId::new()),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_anonymous_create_follows_sidebar_switch() {
    let body = |sidebar: bool| {
        json!({ "name": "Quick", "project": ProjectId::new(), "is_sidebar_item": sidebar })
    };

    let strict = TestApp::new();
    let denied = strict
        .request("POST", "/api/directories", Some(body(true)), None)
        .await;
    assert_eq!(denied.status, StatusCode::UNAUTHORIZED);
    assert_eq!(denied.error_code(), "UNAUTHORIZED");

    let open = TestApp::with_policy(PolicyConfig {
        allow_anonymous_delete: false,
        allow_sidebar_create: true,
    });
    let created = open
        .request("POST", "/api/directories", Some(body(true)), None)
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert!(created.body["data"]["created_by"].is_null());

    let plain = open
        .request("POST", "/api/directories", Some(body(false)), None)
        .await;
    assert_eq!(plain.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_bearer_token_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/directories",
            Some(json!({ "name": "X", "project": ProjectId::new() })),
            Some("not-a-jwt"),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_cascades_to_subdirectories_and_files() {
    let app = TestApp::new();
    let project = ProjectId::new();
    let assets = id_of(&app.create_directory(project, None, "Assets").await);
    let models = id_of(&app.create_directory(project, Some(&assets), "Models").await);
    let keep = id_of(&app.create_directory(project, None, "Keep").await);

    let cube = id_of(&app.upload(project, Some(&models), "cube.obj").await);
    let revised = app.revise(&cube, "blob://cube.obj/2").await;
    assert_eq!(revised.status, StatusCode::CREATED);
    let survivor = id_of(&app.upload(project, Some(&keep), "sphere.obj").await);

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/directories/{assets}"),
            None,
            Some(&app.token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"], json!({ "directories": 2, "files": 2 }));

    for path in [
        format!("/api/directories/{models}"),
        format!("/api/files/{cube}"),
    ] {
        let gone = app.request("GET", &path, None, None).await;
        assert_eq!(gone.status, StatusCode::NOT_FOUND, "{path} should be gone");
    }
    let kept = app
        .request("GET", &format!("/api/files/{survivor}"), None, None)
        .await;
    assert_eq!(kept.status, StatusCode::OK);
}

#[tokio::test]
async fn test_anonymous_delete_follows_switch() {
    let strict = TestApp::new();
    let project = ProjectId::new();
    let dir = id_of(&strict.create_directory(project, None, "Temp").await);
    let denied = strict
        .request("DELETE", &format!("/api/directories/{dir}"), None, None)
        .await;
    assert_eq!(denied.status, StatusCode::UNAUTHORIZED);

    let open = TestApp::with_policy(PolicyConfig {
        allow_anonymous_delete: true,
        allow_sidebar_create: false,
    });
    let dir = id_of(&open.create_directory(project, None, "Temp").await);
    let deleted = open
        .request("DELETE", &format!("/api/directories/{dir}"), None, None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
}

#[tokio::test]
async fn test_move_rejects_descendant_target() {
    let app = TestApp::new();
    let project = ProjectId::new();
    let a = id_of(&app.create_directory(project, None, "a").await);
    let b = id_of(&app.create_directory(project, Some(&a), "b").await);

    let cycle = app
        .request(
            "PUT",
            &format!("/api/directories/{a}/move"),
            Some(json!({ "parent": b })),
            Some(&app.token),
        )
        .await;
    assert_eq!(cycle.status, StatusCode::BAD_REQUEST);

    let to_top = app
        .request(
            "PUT",
            &format!("/api/directories/{b}/move"),
            Some(json!({ "parent": null })),
            Some(&app.token),
        )
        .await;
    assert_eq!(to_top.status, StatusCode::OK);
    assert!(to_top.body["data"]["parent_id"].is_null());
}

#[tokio::test]
async fn test_move_rejects_parent_from_other_project() {
    let app = TestApp::new();
    let project = ProjectId::new();
    let home = id_of(&app.create_directory(project, None, "Home").await);
    let foreign = id_of(&app.create_directory(ProjectId::new(), None, "Foreign").await);

    let response = app
        .request(
            "PUT",
            &format!("/api/directories/{home}/move"),
            Some(json!({ "parent": foreign })),
            Some(&app.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");

    let top = app
        .request(
            "GET",
            &format!("/api/directories?project={project}&parent=null"),
            None,
            None,
        )
        .await;
    assert_eq!(sorted_names(top.items()), vec!["Home"]);
}

#[tokio::test]
async fn test_blank_filters_behave_as_omitted() {
    let app = TestApp::new();
    let project = ProjectId::new();
    let assets = id_of(&app.create_directory(project, None, "Assets").await);
    app.create_directory(project, Some(&assets), "Models").await;

    let all = app
        .request(
            "GET",
            &format!("/api/directories?project={project}&parent="),
            None,
            None,
        )
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(sorted_names(all.items()), vec!["Assets", "Models"]);

    let no_project = app
        .request("GET", "/api/directories?project=&parent=", None, None)
        .await;
    assert_eq!(no_project.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_project.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_directory_id_is_validation_error() {
    let app = TestApp::new();

    let response = app
        .request("DELETE", "/api/directories/not-a-uuid", None, Some(&app.token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_unknown_directory() {
    let app = TestApp::new();

    let response = app
        .request(
            "GET",
            "/api/directories/00000000-0000-0000-0000-999999999999",
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["retryable"], json!(false));
}
