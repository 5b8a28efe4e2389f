//! Local identity provider backed by the application database.
//!
//! Stores credentials in the `users` table with Argon2id hashes. Email
//! uniqueness is enforced by a case-insensitive UNIQUE index; a violation
//! surfaces as [`AuthError::EmailTaken`].

use async_trait::async_trait;
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

use super::password::{hash_password, verify_password, PasswordError};
use super::provider::{AuthError, IdentityProvider, IdentityUser};
use crate::db::Database;

/// Identity provider implementation over the local `users` table.
#[derive(Clone)]
pub struct LocalIdentityProvider {
    db: Database,
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    email: String,
    password: String,
    name: Option<String>,
    email_verified: bool,
}

impl UserRow {
    fn into_user(self) -> IdentityUser {
        IdentityUser {
            id: self.id,
            email: self.email,
            name: self.name,
            email_verified: self.email_verified,
        }
    }
}

impl LocalIdentityProvider {
    /// Create a provider over the given database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn validate_email(email: &str) -> Result<(), AuthError> {
        let mut parts = email.splitn(2, '@');
        let local = parts.next().unwrap_or("");
        let domain = parts.next().unwrap_or("");
        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(AuthError::InvalidEmail);
        }
        Ok(())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<UserRow>, AuthError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password, name, email_verified
             FROM users WHERE email = ? COLLATE NOCASE",
        )
        .bind(email)
        .fetch_optional(self.db.pool())
        .await
        .map_err(|e| AuthError::Provider(e.to_string()))
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<IdentityUser, AuthError> {
        let email = email.trim();
        Self::validate_email(email)?;

        let hash = hash_password(password).map_err(|e| match e {
            PasswordError::TooShort | PasswordError::TooLong => AuthError::WeakPassword,
            other => AuthError::Provider(other.to_string()),
        })?;

        let id = Uuid::new_v4().to_string();
        let name = name.trim();
        let stored_name = (!name.is_empty()).then(|| name.to_string());

        let result = sqlx::query(
            "INSERT INTO users (id, email, password, name) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(email)
        .bind(&hash)
        .bind(&stored_name)
        .execute(self.db.pool())
        .await;

        if let Err(e) = result {
            if e.as_database_error()
                .is_some_and(|d| d.is_unique_violation())
            {
                return Err(AuthError::EmailTaken);
            }
            warn!("sign_up failed: {}", e);
            return Err(AuthError::Provider(e.to_string()));
        }

        Ok(IdentityUser {
            id,
            email: email.to_string(),
            name: stored_name,
            email_verified: false,
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityUser, AuthError> {
        let row = self
            .get_by_email(email.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &row.password).map_err(|_| AuthError::InvalidCredentials)?;

        Ok(row.into_user())
    }

    async fn get_user(&self, id: &str) -> Result<Option<IdentityUser>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password, name, email_verified FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await
        .map_err(|e| AuthError::Provider(e.to_string()))?;

        Ok(row.map(UserRow::into_user))
    }

    async fn list_users(&self, page: u32, per_page: u32) -> Result<Vec<IdentityUser>, AuthError> {
        let page = page.max(1);
        let offset = (page - 1) as i64 * per_page as i64;

        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password, name, email_verified
             FROM users ORDER BY created_at ASC, id ASC LIMIT ? OFFSET ?",
        )
        .bind(per_page as i64)
        .bind(offset)
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| AuthError::Provider(e.to_string()))?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }
}
