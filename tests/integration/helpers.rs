//! Shared test helpers for integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use bytes::Bytes;
use serde_json::{Value, json};
use tower::ServiceExt;

use assethub_api::app::build_app;
use assethub_api::state::AppState;
use assethub_auth::JwtEncoder;
use assethub_core::config::{AppConfig, PolicyConfig, StoreBackend};
use assethub_core::result::AppResult;
use assethub_core::traits::converter::{ConversionInput, ConversionOutput, MeshConverter};
use assethub_core::types::id::{ProjectId, UserId};
use assethub_database::MemoryStore;

const TEST_SECRET: &str = "integration-test-secret";

/// Converter that wraps the input instead of running an external tool.
#[derive(Debug)]
pub struct EchoConverter;

#[async_trait]
impl MeshConverter for EchoConverter {
    fn source_extension(&self) -> &str {
        "obj"
    }

    async fn convert(&self, input: ConversionInput) -> AppResult<ConversionOutput> {
        let stem = input
            .file_name
            .rsplit_once('.')
            .map_or(input.file_name.as_str(), |(stem, _)| stem);
        let mut payload = b"gltf:".to_vec();
        payload.extend_from_slice(&input.payload);
        Ok(ConversionOutput {
            file_name: format!("{stem}.gltf"),
            mime_type: "model/gltf+json".to_string(),
            payload: Bytes::from(payload),
        })
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store, for planting records the API would never write
    pub store: Arc<MemoryStore>,
    /// Bearer token of an authenticated test user
    pub token: String,
}

impl TestApp {
    /// Create a test application that requires authentication for every write
    pub fn new() -> Self {
        Self::with_policy(PolicyConfig::default())
    }

    /// Create a test application with the given anonymous write switches
    pub fn with_policy(policy: PolicyConfig) -> Self {
        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Memory;
        config.auth.jwt_secret = TEST_SECRET.to_string();
        config.policy = policy;
        config.conversion.max_input_bytes = 1024;

        let token = JwtEncoder::new(&config.auth)
            .issue(UserId::new(), chrono::Duration::minutes(5))
            .expect("Failed to sign test token");

        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(
            config,
            store.clone(),
            store.clone(),
            Arc::new(EchoConverter),
        );

        Self {
            router: build_app(state),
            store,
            token,
        }
    }

    /// Make an HTTP request to the test app
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
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let raw = self.send(req).await;
        let body: Value = serde_json::from_slice(&raw.body).unwrap_or(Value::Null);

        TestResponse {
            status: raw.status,
            body,
        }
    }

    /// Send a prepared request and collect the raw response
    pub async fn send(&self, req: Request<Body>) -> RawResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        RawResponse {
            status,
            headers,
            body,
        }
    }

    /// Create a directory as the test user and return its JSON
    pub async fn create_directory(
        &self,
        project: ProjectId,
        parent: Option<&str>,
        name: &str,
    ) -> Value {
        let response = self
            .request(
                "POST",
                "/api/directories",
                Some(json!({ "name": name, "project": project, "parent": parent })),
                Some(&self.token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Directory creation failed: {:?}",
            response.body
        );
        response.body["data"].clone()
    }

    /// Upload a chain root as the test user and return its JSON
    pub async fn upload(&self, project: ProjectId, directory: Option<&str>, name: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/files",
                Some(json!({
                    "name": name,
                    "project": project,
                    "directory": directory,
                    "size": 128,
                    "content_ref": format!("blob://{name}/1"),
                })),
                Some(&self.token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Upload failed: {:?}",
            response.body
        );
        response.body["data"].clone()
    }

    /// Revise `previous_id` as the test user
    pub async fn revise(&self, previous_id: &str, content_ref: &str) -> TestResponse {
        self.request(
            "POST",
            &format!("/api/files/{previous_id}/revisions"),
            Some(json!({ "size": 256, "content_ref": content_ref })),
            Some(&self.token),
        )
        .await
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
    /// The `data` array of a success response
    pub fn items(&self) -> &Vec<Value> {
        self.body["data"]
            .as_array()
            .unwrap_or_else(|| panic!("Expected a list response, got {:?}", self.body))
    }

    /// String field of the `data` object
    pub fn field(&self, name: &str) -> &str {
        self.body["data"][name]
            .as_str()
            .unwrap_or_else(|| panic!("Missing '{name}' in {:?}", self.body))
    }

    /// The machine-readable error code of an error response
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

/// Unparsed response
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

/// String field of a JSON object
pub fn id_of(value: &Value) -> String {
    value["id"]
        .as_str()
        .unwrap_or_else(|| panic!("Missing id in {value:?}"))
        .to_string()
}

/// The `name` field of each item, sorted
pub fn sorted_names(items: &[Value]) -> Vec<String> {
    let mut names: Vec<String> = items
        .iter()
        .filter_map(|v| v["name"].as_str().map(str::to_string))
        .collect();
    names.sort();
    names
}
