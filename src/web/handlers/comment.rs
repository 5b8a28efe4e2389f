//! Comment handlers.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use super::{parse_comment_form, AppState};
use crate::web::dto::{ApiResponse, CommentResponse, CommentUpdateRequest};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /api/posts/:id/comments - List a post's comments, newest first.
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<CommentResponse>>>, ApiError> {
    // 404 for a missing post rather than an empty list
    state
        .post_repo
        .get_by_id(post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let comments = state.comments.list(post_id).await?;

    Ok(Json(ApiResponse::new(
        comments.into_iter().map(CommentResponse::from).collect(),
    )))
}

/// POST /api/posts/:id/comments - Comment on a post. Multipart: `body`,
/// optional `image`.
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(post_id): Path<i64>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<CommentResponse>>), ApiError> {
    let form = parse_comment_form(multipart).await?;

    let comment = state
        .comments
        .create(post_id, &claims.sub, &form.body, form.image)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(comment.into()))))
}

/// PUT /api/comments/:id - Edit a comment the caller owns.
pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<CommentUpdateRequest>,
) -> Result<Json<ApiResponse<CommentResponse>>, ApiError> {
    let comment = state.comments.update(id, &claims.sub, &req.body).await?;
    Ok(Json(ApiResponse::new(comment.into())))
}

/// DELETE /api/comments/:id - Delete a comment the caller owns.
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.comments.delete(id, &claims.sub).await?;
    Ok(StatusCode::NO_CONTENT)
}
