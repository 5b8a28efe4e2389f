//! Authentication handlers.

use axum::{extract::State, Json};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;

use crate::auth::{email_exists, AuthError, IdentityProvider, IdentityUser};
use crate::comment::CommentService;
use crate::post::{PostRepository, PostService};
use crate::storage::ObjectStore;
use crate::web::dto::{ApiResponse, LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use crate::web::error::ApiError;
use crate::web::middleware::{AuthUser, JwtClaims};
use crate::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Identity provider.
    pub identity: Arc<dyn IdentityProvider>,
    /// Object storage.
    pub storage: Arc<dyn ObjectStore>,
    /// Post write service.
    pub posts: PostService,
    /// Post read repository.
    pub post_repo: PostRepository,
    /// Comment service.
    pub comments: CommentService,
    /// JWT encoding key.
    pub encoding_key: EncodingKey,
    /// Access token expiry in seconds.
    pub access_token_expiry: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        db: Database,
        identity: Arc<dyn IdentityProvider>,
        storage: Arc<dyn ObjectStore>,
        jwt_secret: &str,
        access_token_expiry: u64,
    ) -> Self {
        let post_repo = PostRepository::new(db.clone());
        let posts = PostService::new(post_repo.clone(), identity.clone(), storage.clone());
        let comments = CommentService::new(
            crate::comment::CommentRepository::new(db.clone()),
            identity.clone(),
            storage.clone(),
        );

        Self {
            db,
            identity,
            storage,
            posts,
            post_repo,
            comments,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            access_token_expiry,
        }
    }

    /// Generate an access token for a user.
    pub fn generate_access_token(&self, user: &IdentityUser) -> Result<String, ApiError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = JwtClaims {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            iat: now,
            exp: now + self.access_token_expiry,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode JWT: {}", e);
            ApiError::internal("Failed to generate token")
        })
    }

    fn login_response(&self, user: IdentityUser) -> Result<LoginResponse, ApiError> {
        let access_token = self.generate_access_token(&user)?;
        Ok(LoginResponse {
            access_token,
            expires_in: self.access_token_expiry,
            user: user.into(),
        })
    }
}

/// POST /api/auth/register - Create an account and sign in.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let email = req.email.trim();
    if email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    // Directory check first so an existing account reports the taken email
    // even when the provider's own duplicate handling is opaque.
    if email_exists(state.identity.as_ref(), email).await? {
        return Err(AuthError::EmailTaken.into());
    }

    let user = state.identity.sign_up(email, &req.password, &req.name).await?;
    tracing::info!("Registered user {}", user.id);

    Ok(Json(ApiResponse::new(state.login_response(user)?)))
}

/// POST /api/auth/login - Sign in.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let user = state.identity.sign_in(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::new(state.login_response(user)?)))
}

/// GET /api/auth/me - Current user.
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user = state
        .identity
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Account no longer exists"))?;

    Ok(Json(ApiResponse::new(user.into())))
}
