//! Feed handlers: the public feed and the owner dashboard.

use axum::extract::{Query, State};
use axum::Json;
use std::sync::Arc;

use super::AppState;
use crate::post::{FeedQuery, PAGE_SIZE};
use crate::web::dto::{FeedItemResponse, FeedParams, PaginatedResponse};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /api/posts - Public feed, paginated, searchable, newest first.
pub async fn public_feed(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeedParams>,
) -> Result<Json<PaginatedResponse<FeedItemResponse>>, ApiError> {
    let query = params.into_query(None)?;
    feed_page(&state, query).await
}

/// GET /api/dashboard/posts - The caller's own posts. Search covers title
/// and content only.
pub async fn dashboard_feed(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Query(params): Query<FeedParams>,
) -> Result<Json<PaginatedResponse<FeedItemResponse>>, ApiError> {
    let query = params.into_query(Some(claims.sub))?;
    feed_page(&state, query).await
}

async fn feed_page(
    state: &AppState,
    query: FeedQuery,
) -> Result<Json<PaginatedResponse<FeedItemResponse>>, ApiError> {
    let page = state.post_repo.search(&query).await?;
    let search = query.search_term();

    let items = page
        .posts
        .iter()
        .cloned()
        .map(|post| FeedItemResponse::from_post(post, search))
        .collect();

    Ok(Json(PaginatedResponse::new(
        items,
        query.effective_page(),
        PAGE_SIZE,
        page.total.max(0) as u64,
        page.total_pages(),
    )))
}
