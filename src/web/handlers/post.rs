//! Post handlers.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use super::{parse_post_form, AppState};
use crate::web::dto::{ApiResponse, PostResponse};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /api/posts/:id - Fetch a single post.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    let post = state
        .post_repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    Ok(Json(ApiResponse::new(post.into())))
}

/// POST /api/posts - Create a post. Multipart: `title`, `content`,
/// optional `image`.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<PostResponse>>), ApiError> {
    let form = parse_post_form(multipart).await?;

    let post = state
        .posts
        .create(&claims.sub, &form.title, &form.content, form.image)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(post.into()))))
}

/// PUT /api/posts/:id - Update a post the caller owns. Omitting the image
/// keeps the stored one.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    let form = parse_post_form(multipart).await?;

    let post = state
        .posts
        .update(id, &claims.sub, &form.title, &form.content, form.image)
        .await?;

    Ok(Json(ApiResponse::new(post.into())))
}

/// DELETE /api/posts/:id - Delete a post the caller owns.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.posts.delete(id, &claims.sub).await?;
    Ok(StatusCode::NO_CONTENT)
}
