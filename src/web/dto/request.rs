//! Request DTOs for the Web API.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::post::FeedQuery;
use crate::web::error::ApiError;

/// Registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Display name, may be empty.
    #[serde(default)]
    pub name: String,
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Comment update request.
#[derive(Debug, Deserialize)]
pub struct CommentUpdateRequest {
    /// New comment text.
    pub body: String,
}

/// Feed query parameters.
#[derive(Debug, Deserialize, Default)]
pub struct FeedParams {
    /// Search term.
    pub q: Option<String>,
    /// Date filter, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// 1-based page number. Zero and negative values clamp to 1.
    pub page: Option<i64>,
}

impl FeedParams {
    /// Convert to a [`FeedQuery`], rejecting malformed dates.
    pub fn into_query(self, owner_id: Option<String>) -> Result<FeedQuery, ApiError> {
        let date = match self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| ApiError::bad_request("Invalid date format. Use YYYY-MM-DD."))?,
            ),
            None => None,
        };

        Ok(FeedQuery {
            search: self.q,
            date,
            page: self.page.unwrap_or(1).clamp(1, u32::MAX as i64) as u32,
            owner_id,
        })
    }
}
