//! Router configuration for the Web API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_comment, create_post, dashboard_feed, delete_comment, delete_post, get_post,
    list_comments, login, me, public_feed, register, update_comment, update_post, AppState,
};
use super::middleware::{create_cors_layer, jwt_auth, JwtState};

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    jwt_state: Arc<JwtState>,
    cors_origins: &[String],
) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me));

    let post_routes = Router::new()
        .route("/", get(public_feed).post(create_post))
        .route("/:id", get(get_post).put(update_post).delete(delete_post))
        .route("/:id/comments", get(list_comments).post(create_comment));

    let comment_routes = Router::new()
        .route("/:id", put(update_comment).delete(delete_comment));

    let dashboard_routes = Router::new().route("/posts", get(dashboard_feed));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/posts", post_routes)
        .nest("/comments", comment_routes)
        .nest("/dashboard", dashboard_routes);

    // Clone jwt_state for the middleware closure
    let jwt_state_for_middleware = jwt_state.clone();

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let state = jwt_state_for_middleware.clone();
                    jwt_auth(state, req, next)
                }))
                // Raise the extractor limit above MAX_IMAGE_BYTES so the
                // application-level size check can reject oversized images
                // with its own message; the headroom covers text fields and
                // multipart framing.
                .layer(DefaultBodyLimit::max(
                    crate::image::MAX_IMAGE_BYTES + 64 * 1024,
                )),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create a router serving stored objects under `public_base`.
pub fn create_files_router(public_base: &str, storage_path: impl AsRef<Path>) -> Router {
    Router::new().nest_service(public_base, ServeDir::new(storage_path))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
