//! Shared helpers for Web API integration tests.

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use blogun::auth::LocalIdentityProvider;
use blogun::storage::FsObjectStore;
use blogun::web::handlers::AppState;
use blogun::web::middleware::JwtState;
use blogun::web::router::{create_health_router, create_router};
use blogun::Database;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only";

/// A running test server with its backing database and storage.
pub struct TestContext {
    pub server: TestServer,
    pub db: Database,
    _storage_dir: TempDir,
}

/// Create a test server over an in-memory database and temp storage.
pub async fn create_test_server() -> TestContext {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let storage_dir = TempDir::new().expect("Failed to create storage dir");

    let identity = Arc::new(LocalIdentityProvider::new(db.clone()));
    let storage = Arc::new(FsObjectStore::new(storage_dir.path(), "/files"));

    let app_state = Arc::new(AppState::new(
        db.clone(),
        identity,
        storage,
        TEST_JWT_SECRET,
        900,
    ));
    let jwt_state = Arc::new(JwtState::new(TEST_JWT_SECRET));

    let router = create_router(app_state, jwt_state, &[]).merge(create_health_router());
    let server = TestServer::new(router).expect("Failed to create test server");

    TestContext {
        server,
        db,
        _storage_dir: storage_dir,
    }
}

/// Register a user and return the registration response body.
pub async fn register_user(server: &TestServer, email: &str, name: &str) -> Value {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": email,
            "password": "password123",
            "name": name
        }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

/// Register a user and return just the access token.
pub async fn register_and_token(server: &TestServer, email: &str, name: &str) -> String {
    let body = register_user(server, email, name).await;
    body["data"]["access_token"]
        .as_str()
        .expect("access token in registration response")
        .to_string()
}

/// Bearer header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Multipart form for a post without an image.
pub fn post_form(title: &str, content: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title.to_string())
        .add_text("content", content.to_string())
}

/// Multipart form for a post with an image attachment.
pub fn post_form_with_image(
    title: &str,
    content: &str,
    filename: &str,
    mime: &str,
    data: Vec<u8>,
) -> MultipartForm {
    post_form(title, content).add_part(
        "image",
        Part::bytes(data)
            .file_name(filename.to_string())
            .mime_type(mime),
    )
}

/// Create a post via the API, returning its id.
pub async fn create_post(server: &TestServer, token: &str, title: &str, content: &str) -> i64 {
    let response = server
        .post("/api/posts")
        .add_header(AUTHORIZATION, bearer(token))
        .multipart(post_form(title, content))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["data"]["id"]
        .as_i64()
        .expect("post id")
}

/// Extract the error message from an error body.
pub fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap_or("")
}
