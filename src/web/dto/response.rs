//! Response DTOs for the Web API.

use serde::Serialize;

use crate::auth::IdentityUser;
use crate::comment::Comment;
use crate::datetime::{format_date, format_datetime, to_rfc3339};
use crate::format::{excerpt, highlight, Segment, EXCERPT_MAX};
use crate::post::Post;

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Response data.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Create a new paginated response.
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: u64, total_pages: u32) -> Self {
        Self {
            data,
            meta: PaginationMeta {
                page,
                per_page,
                total,
                total_pages,
            },
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u64,
    /// Total number of pages, at least 1.
    pub total_pages: u32,
}

// ============================================================================
// Auth DTOs
// ============================================================================

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Access token (JWT).
    pub access_token: String,
    /// Access token expiry in seconds.
    pub expires_in: u64,
    /// User information.
    pub user: UserInfo,
}

/// User information in responses.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// Identity user id.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Display name metadata, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the email address has been verified.
    pub email_verified: bool,
}

impl From<IdentityUser> for UserInfo {
    fn from(user: IdentityUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            email_verified: user.email_verified,
        }
    }
}

// ============================================================================
// Post DTOs
// ============================================================================

/// Full post response.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    /// Post ID.
    pub id: i64,
    /// Owner's identity id.
    pub user_id: String,
    /// Title.
    pub title: String,
    /// Content.
    pub content: String,
    /// Author display name.
    pub author_name: String,
    /// Image URL, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            title: post.title,
            content: post.content,
            author_name: post.author_name,
            image_url: post.image_url,
            created_at: to_rfc3339(&post.created_at),
            updated_at: to_rfc3339(&post.updated_at),
        }
    }
}

/// Feed item: a post prepared for list rendering, with the search term
/// highlighted in the title, excerpt, and author name.
#[derive(Debug, Serialize)]
pub struct FeedItemResponse {
    /// Post ID.
    pub id: i64,
    /// Owner's identity id.
    pub user_id: String,
    /// Title segments.
    pub title: Vec<Segment>,
    /// Excerpt segments, at most 160 characters plus an ellipsis.
    pub excerpt: Vec<Segment>,
    /// Author name segments.
    pub author_name: Vec<Segment>,
    /// Image URL, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Creation date for display (YYYY/MM/DD).
    pub created_date: String,
}

impl FeedItemResponse {
    /// Build a feed item, highlighting `search` where present.
    pub fn from_post(post: Post, search: Option<&str>) -> Self {
        let query = search.unwrap_or("");
        let excerpt_text = excerpt(&post.content, EXCERPT_MAX);
        Self {
            id: post.id,
            title: highlight(&post.title, query),
            excerpt: highlight(&excerpt_text, query),
            author_name: highlight(&post.author_name, query),
            user_id: post.user_id,
            image_url: post.image_url,
            created_at: to_rfc3339(&post.created_at),
            created_date: format_date(&post.created_at),
        }
    }
}

// ============================================================================
// Comment DTOs
// ============================================================================

/// Comment response.
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    /// Comment ID.
    pub id: i64,
    /// Post this comment belongs to.
    pub post_id: i64,
    /// Commenter's identity id, when the row has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Commenter display name.
    pub author_name: String,
    /// Comment text.
    pub body: String,
    /// Image URL, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Creation timestamp for display (YYYY/MM/DD HH:MM).
    pub created_display: String,
    /// Edit timestamp (RFC 3339), if edited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<String>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            author_name: comment
                .author_name
                .unwrap_or_else(|| crate::auth::COMMENT_AUTHOR_FALLBACK.to_string()),
            body: comment.body,
            image_url: comment.image_url,
            created_display: format_datetime(&comment.created_at),
            created_at: to_rfc3339(&comment.created_at),
            edited_at: comment.edited_at.as_deref().map(to_rfc3339),
        }
    }
}
