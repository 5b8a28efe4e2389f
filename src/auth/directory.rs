//! Directory lookups against the identity provider.
//!
//! The provider only exposes paginated listing, so existence checks walk
//! pages until a match, a short page, or the page ceiling.

use tracing::warn;

use super::provider::{AuthError, IdentityProvider};

/// Users fetched per directory page.
pub const DIRECTORY_PAGE_SIZE: u32 = 200;

/// Upper bound on pages scanned per lookup.
pub const MAX_DIRECTORY_PAGES: u32 = 50;

/// Check whether an account with `email` already exists.
///
/// Comparison is case-insensitive and exact. The scan stops at the first
/// match, at the first short page (end of directory), or at
/// [`MAX_DIRECTORY_PAGES`]; past the ceiling the email is reported absent.
pub async fn email_exists(
    provider: &dyn IdentityProvider,
    email: &str,
) -> Result<bool, AuthError> {
    let needle = email.trim();

    for page in 1..=MAX_DIRECTORY_PAGES {
        let batch = provider.list_users(page, DIRECTORY_PAGE_SIZE).await?;

        if batch
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(needle))
        {
            return Ok(true);
        }

        if (batch.len() as u32) < DIRECTORY_PAGE_SIZE {
            return Ok(false);
        }
    }

    warn!(
        "directory scan for {:?} hit the {}-page ceiling",
        needle, MAX_DIRECTORY_PAGES
    );
    Ok(false)
}
