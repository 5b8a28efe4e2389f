//! Web API post tests.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use serde_json::Value;

use common::{
    bearer, create_post, create_test_server, error_message, post_form, post_form_with_image,
    register_and_token,
};

#[tokio::test]
async fn test_create_post() {
    let ctx = create_test_server().await;
    let token = register_and_token(&ctx.server, "maria@example.com", "Maria").await;

    let response = ctx
        .server
        .post("/api/posts")
        .add_header(AUTHORIZATION, bearer(&token))
        .multipart(post_form("Hello", "My first post"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["title"], "Hello");
    assert_eq!(body["data"]["content"], "My first post");
    assert_eq!(body["data"]["author_name"], "Maria");
    assert!(body["data"]["image_url"].is_null());
    // RFC 3339 timestamps
    assert!(body["data"]["created_at"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_create_post_requires_auth() {
    let ctx = create_test_server().await;

    let response = ctx
        .server
        .post("/api/posts")
        .multipart(post_form("Hello", "body"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_post_validation_messages() {
    let ctx = create_test_server().await;
    let token = register_and_token(&ctx.server, "maria@example.com", "Maria").await;

    let cases = [
        ("", "body", "Title and content are required."),
        ("title", "   ", "Title and content are required."),
        (
            &"x".repeat(51) as &str,
            "body",
            "Title must be 50 characters or less.",
        ),
        (
            "title",
            &"x".repeat(101) as &str,
            "Content must be 100 characters or less.",
        ),
    ];

    for (title, content, message) in cases {
        let response = ctx
            .server
            .post("/api/posts")
            .add_header(AUTHORIZATION, bearer(&token))
            .multipart(post_form(title, content))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(error_message(&body), message);
    }
}

#[tokio::test]
async fn test_create_post_at_limits() {
    let ctx = create_test_server().await;
    let token = register_and_token(&ctx.server, "maria@example.com", "Maria").await;

    let response = ctx
        .server
        .post("/api/posts")
        .add_header(AUTHORIZATION, bearer(&token))
        .multipart(post_form(&"t".repeat(50), &"c".repeat(100)))
        .await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_post_with_image() {
    let ctx = create_test_server().await;
    let token = register_and_token(&ctx.server, "maria@example.com", "Maria").await;

    let response = ctx
        .server
        .post("/api/posts")
        .add_header(AUTHORIZATION, bearer(&token))
        .multipart(post_form_with_image(
            "With image",
            "body",
            "photo.png",
            "image/png",
            vec![0u8; 256],
        ))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let url = body["data"]["image_url"].as_str().unwrap();
    assert!(url.starts_with("/files/post-images/"), "{url}");
    assert!(url.ends_with(".png"), "{url}");
}

#[tokio::test]
async fn test_create_post_rejects_non_image() {
    let ctx = create_test_server().await;
    let token = register_and_token(&ctx.server, "maria@example.com", "Maria").await;

    let response = ctx
        .server
        .post("/api/posts")
        .add_header(AUTHORIZATION, bearer(&token))
        .multipart(post_form_with_image(
            "Bad upload",
            "body",
            "notes.txt",
            "text/plain",
            b"not an image".to_vec(),
        ))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(error_message(&body), "Image file only.");
}

#[tokio::test]
async fn test_get_post() {
    let ctx = create_test_server().await;
    let token = register_and_token(&ctx.server, "maria@example.com", "Maria").await;
    let id = create_post(&ctx.server, &token, "Readable", "Anyone can read this").await;

    // No auth needed for reads
    let response = ctx.server.get(&format!("/api/posts/{id}")).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["title"], "Readable");
}

#[tokio::test]
async fn test_get_missing_post() {
    let ctx = create_test_server().await;
    let response = ctx.server.get("/api/posts/9999").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_post_by_owner() {
    let ctx = create_test_server().await;
    let token = register_and_token(&ctx.server, "maria@example.com", "Maria").await;
    let id = create_post(&ctx.server, &token, "Old title", "Old body").await;

    let response = ctx
        .server
        .put(&format!("/api/posts/{id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .multipart(post_form("New title", "New body"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["title"], "New title");
}

#[tokio::test]
async fn test_update_post_by_non_owner_is_not_found() {
    let ctx = create_test_server().await;
    let owner = register_and_token(&ctx.server, "maria@example.com", "Maria").await;
    let other = register_and_token(&ctx.server, "victor@example.com", "Victor").await;
    let id = create_post(&ctx.server, &owner, "Mine", "Keep out").await;

    let response = ctx
        .server
        .put(&format!("/api/posts/{id}"))
        .add_header(AUTHORIZATION, bearer(&other))
        .multipart(post_form("Stolen", "Post"))
        .await;

    // No existence leak for rows the caller does not own
    response.assert_status(StatusCode::NOT_FOUND);

    // Unchanged
    let body: Value = ctx.server.get(&format!("/api/posts/{id}")).await.json();
    assert_eq!(body["data"]["title"], "Mine");
}

#[tokio::test]
async fn test_update_keeps_image_when_absent() {
    let ctx = create_test_server().await;
    let token = register_and_token(&ctx.server, "maria@example.com", "Maria").await;

    let create = ctx
        .server
        .post("/api/posts")
        .add_header(AUTHORIZATION, bearer(&token))
        .multipart(post_form_with_image(
            "Pic",
            "body",
            "a.jpg",
            "image/jpeg",
            vec![0u8; 64],
        ))
        .await;
    create.assert_status(StatusCode::CREATED);
    let created: Value = create.json();
    let id = created["data"]["id"].as_i64().unwrap();
    let original_url = created["data"]["image_url"].as_str().unwrap().to_string();

    let response = ctx
        .server
        .put(&format!("/api/posts/{id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .multipart(post_form("Pic v2", "body v2"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["image_url"], original_url.as_str());
}

#[tokio::test]
async fn test_delete_post() {
    let ctx = create_test_server().await;
    let owner = register_and_token(&ctx.server, "maria@example.com", "Maria").await;
    let other = register_and_token(&ctx.server, "victor@example.com", "Victor").await;
    let id = create_post(&ctx.server, &owner, "Doomed", "body").await;

    let response = ctx
        .server
        .delete(&format!("/api/posts/{id}"))
        .add_header(AUTHORIZATION, bearer(&other))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = ctx
        .server
        .delete(&format!("/api/posts/{id}"))
        .add_header(AUTHORIZATION, bearer(&owner))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    ctx.server
        .get(&format!("/api/posts/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
