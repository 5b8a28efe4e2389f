//! JWT authentication middleware.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::web::error::ApiError;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (identity user id).
    pub sub: String,
    /// Email address.
    pub email: String,
    /// Display name metadata, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued at timestamp.
    pub iat: u64,
    /// Expiration timestamp.
    pub exp: u64,
    /// JWT ID (unique identifier).
    pub jti: String,
}

/// Application state for JWT authentication.
#[derive(Clone)]
pub struct JwtState {
    /// Decoding key for JWT verification.
    pub decoding_key: DecodingKey,
    /// Validation settings.
    pub validation: Validation,
}

impl JwtState {
    /// Create a new JWT state from a secret key.
    pub fn new(secret: &str) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        Self {
            decoding_key,
            validation,
        }
    }
}

/// Extractor for authenticated users.
///
/// Use this extractor to require authentication for a handler.
/// The handler will receive the JWT claims if the token is valid.
#[derive(Debug, Clone)]
pub struct AuthUser(pub JwtClaims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|header| header.strip_prefix("Bearer "))
                .ok_or_else(|| ApiError::unauthorized("Missing authorization"))?;

            // Get JWT state from extensions (set by middleware)
            let jwt_state = parts
                .extensions
                .get::<Arc<JwtState>>()
                .ok_or_else(|| ApiError::internal("JWT state not configured"))?;

            let token_data =
                decode::<JwtClaims>(token, &jwt_state.decoding_key, &jwt_state.validation)
                    .map_err(|e| {
                        tracing::debug!("JWT validation failed: {}", e);
                        ApiError::unauthorized("Invalid or expired token")
                    })?;

            Ok(AuthUser(token_data.claims))
        })
    }
}

/// Middleware function to inject JWT state into request extensions.
pub async fn jwt_auth(
    jwt_state: Arc<JwtState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(jwt_state);
    next.run(request).await
}
