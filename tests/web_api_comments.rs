//! Web API comment tests.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{json, Value};

use common::{bearer, create_post, create_test_server, error_message, register_and_token};

fn comment_form(body: &str) -> MultipartForm {
    MultipartForm::new().add_text("body", body.to_string())
}

#[tokio::test]
async fn test_create_and_list_comments() {
    let ctx = create_test_server().await;
    let author = register_and_token(&ctx.server, "maria@example.com", "Maria").await;
    let commenter = register_and_token(&ctx.server, "victor@example.com", "Victor").await;
    let post_id = create_post(&ctx.server, &author, "Discuss", "body").await;

    let response = ctx
        .server
        .post(&format!("/api/posts/{post_id}/comments"))
        .add_header(AUTHORIZATION, bearer(&commenter))
        .multipart(comment_form("Great post!"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["body"], "Great post!");
    assert_eq!(body["data"]["author_name"], "Victor");
    assert!(body["data"]["edited_at"].is_null());

    // listing is public
    let body: Value = ctx
        .server
        .get(&format!("/api/posts/{post_id}/comments"))
        .await
        .json();
    let comments = body["data"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["body"], "Great post!");
}

#[tokio::test]
async fn test_create_comment_requires_auth() {
    let ctx = create_test_server().await;
    let author = register_and_token(&ctx.server, "maria@example.com", "Maria").await;
    let post_id = create_post(&ctx.server, &author, "Discuss", "body").await;

    let response = ctx
        .server
        .post(&format!("/api/posts/{post_id}/comments"))
        .multipart(comment_form("anonymous?"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_comment_requires_body() {
    let ctx = create_test_server().await;
    let token = register_and_token(&ctx.server, "maria@example.com", "Maria").await;
    let post_id = create_post(&ctx.server, &token, "Discuss", "body").await;

    let response = ctx
        .server
        .post(&format!("/api/posts/{post_id}/comments"))
        .add_header(AUTHORIZATION, bearer(&token))
        .multipart(comment_form("   "))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(error_message(&body), "Comment is required.");
}

#[tokio::test]
async fn test_comment_on_missing_post() {
    let ctx = create_test_server().await;
    let token = register_and_token(&ctx.server, "maria@example.com", "Maria").await;

    let response = ctx
        .server
        .post("/api/posts/9999/comments")
        .add_header(AUTHORIZATION, bearer(&token))
        .multipart(comment_form("into the void"))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);

    let response = ctx.server.get("/api/posts/9999/comments").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_with_image() {
    let ctx = create_test_server().await;
    let token = register_and_token(&ctx.server, "maria@example.com", "Maria").await;
    let post_id = create_post(&ctx.server, &token, "Discuss", "body").await;

    let form = comment_form("look at this").add_part(
        "image",
        Part::bytes(vec![0u8; 128])
            .file_name("reaction.gif")
            .mime_type("image/gif"),
    );

    let response = ctx
        .server
        .post(&format!("/api/posts/{post_id}/comments"))
        .add_header(AUTHORIZATION, bearer(&token))
        .multipart(form)
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let url = body["data"]["image_url"].as_str().unwrap();
    assert!(url.starts_with("/files/comment-images/"), "{url}");
    assert!(url.ends_with(".gif"), "{url}");
}

#[tokio::test]
async fn test_comment_rejects_oversized_image() {
    let ctx = create_test_server().await;
    let token = register_and_token(&ctx.server, "maria@example.com", "Maria").await;
    let post_id = create_post(&ctx.server, &token, "Discuss", "body").await;

    let form = comment_form("too big").add_part(
        "image",
        Part::bytes(vec![0u8; 2 * 1024 * 1024 + 1])
            .file_name("huge.png")
            .mime_type("image/png"),
    );

    let response = ctx
        .server
        .post(&format!("/api/posts/{post_id}/comments"))
        .add_header(AUTHORIZATION, bearer(&token))
        .multipart(form)
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(error_message(&body), "Image is too large. Max 2MB.");
}

#[tokio::test]
async fn test_update_comment() {
    let ctx = create_test_server().await;
    let owner = register_and_token(&ctx.server, "maria@example.com", "Maria").await;
    let other = register_and_token(&ctx.server, "victor@example.com", "Victor").await;
    let post_id = create_post(&ctx.server, &owner, "Discuss", "body").await;

    let created: Value = ctx
        .server
        .post(&format!("/api/posts/{post_id}/comments"))
        .add_header(AUTHORIZATION, bearer(&owner))
        .multipart(comment_form("first draft"))
        .await
        .json();
    let comment_id = created["data"]["id"].as_i64().unwrap();

    // non-owner edit reports not found
    let response = ctx
        .server
        .put(&format!("/api/comments/{comment_id}"))
        .add_header(AUTHORIZATION, bearer(&other))
        .json(&json!({ "body": "hijacked" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = ctx
        .server
        .put(&format!("/api/comments/{comment_id}"))
        .add_header(AUTHORIZATION, bearer(&owner))
        .json(&json!({ "body": "final version" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["body"], "final version");
    assert!(body["data"]["edited_at"].is_string());
}

#[tokio::test]
async fn test_delete_comment() {
    let ctx = create_test_server().await;
    let owner = register_and_token(&ctx.server, "maria@example.com", "Maria").await;
    let other = register_and_token(&ctx.server, "victor@example.com", "Victor").await;
    let post_id = create_post(&ctx.server, &owner, "Discuss", "body").await;

    let created: Value = ctx
        .server
        .post(&format!("/api/posts/{post_id}/comments"))
        .add_header(AUTHORIZATION, bearer(&owner))
        .multipart(comment_form("temporary"))
        .await
        .json();
    let comment_id = created["data"]["id"].as_i64().unwrap();

    let response = ctx
        .server
        .delete(&format!("/api/comments/{comment_id}"))
        .add_header(AUTHORIZATION, bearer(&other))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = ctx
        .server
        .delete(&format!("/api/comments/{comment_id}"))
        .add_header(AUTHORIZATION, bearer(&owner))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let body: Value = ctx
        .server
        .get(&format!("/api/posts/{post_id}/comments"))
        .await
        .json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}
