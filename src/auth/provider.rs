//! Identity provider contract.
//!
//! The rest of the application talks to the identity collaborator only
//! through the [`IdentityProvider`] trait; the concrete implementation is
//! constructed at startup (or replaced by a double in tests) and passed in.

use async_trait::async_trait;
use thiserror::Error;

/// Fallback author name for posts when neither metadata nor email yields one.
pub const POST_AUTHOR_FALLBACK: &str = "Anonymous";

/// Fallback author name for comments.
pub const COMMENT_AUTHOR_FALLBACK: &str = "User";

/// A user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityUser {
    /// Opaque identity id.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Display name from profile metadata, if set.
    pub name: Option<String>,
    /// Whether the email address has been verified.
    pub email_verified: bool,
}

/// Structured identity errors.
///
/// Each kind carries a fixed user-facing message; callers map on the kind,
/// never on free error text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Wrong email/password combination.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Password does not meet the policy.
    #[error("Password must be at least 8 characters.")]
    WeakPassword,

    /// Email address is malformed.
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    /// An account with this email already exists.
    #[error("An account with this email already exists.")]
    EmailTaken,

    /// Provider-side failure (network, storage, internal).
    #[error("Authentication service is unavailable.")]
    Provider(String),
}

/// Identity provider contract.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new user. `name` is stored as profile metadata.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<IdentityUser, AuthError>;

    /// Authenticate with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityUser, AuthError>;

    /// Look up a user by identity id.
    async fn get_user(&self, id: &str) -> Result<Option<IdentityUser>, AuthError>;

    /// List users, 1-based page, at most `per_page` entries per page.
    async fn list_users(&self, page: u32, per_page: u32) -> Result<Vec<IdentityUser>, AuthError>;
}

/// Resolve the display name for a user.
///
/// Precedence: profile metadata name (trimmed) → email local-part →
/// the given fallback. This ordering is user-visible and fixed.
pub fn display_name(user: &IdentityUser, fallback: &str) -> String {
    if let Some(name) = &user.name {
        let name = name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }

    if let Some(local) = user.email.split('@').next() {
        let local = local.trim();
        if !local.is_empty() {
            return local.to_string();
        }
    }

    fallback.to_string()
}
