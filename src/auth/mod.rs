//! Authentication and identity.
//!
//! The application depends on the [`IdentityProvider`] trait; the default
//! implementation is [`LocalIdentityProvider`] over the local users table.

pub mod directory;
pub mod local;
pub mod password;
pub mod provider;

pub use directory::email_exists;
pub use local::LocalIdentityProvider;
pub use provider::{
    display_name, AuthError, IdentityProvider, IdentityUser, COMMENT_AUTHOR_FALLBACK,
    POST_AUTHOR_FALLBACK,
};
