//! Posts: types, feed queries, persistence, and the write service.

pub mod query;
pub mod repository;
pub mod service;

pub use query::{FeedPage, FeedQuery, PAGE_SIZE};
pub use repository::PostRepository;
pub use service::PostService;

use sqlx::FromRow;

/// A stored post.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Post {
    /// Row id.
    pub id: i64,
    /// Owner's identity id.
    pub user_id: String,
    /// Title, at most 50 characters.
    pub title: String,
    /// Body, at most 100 characters.
    pub content: String,
    /// Author display name captured at creation time.
    pub author_name: String,
    /// Public URL of the attached image, if any.
    pub image_url: Option<String>,
    /// Creation timestamp in storage format (UTC).
    pub created_at: String,
    /// Last update timestamp in storage format (UTC).
    pub updated_at: String,
}

/// Fields for creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub author_name: String,
    pub image_url: Option<String>,
}

/// Fields for updating a post. `image_url` of `None` leaves the stored
/// image untouched.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}
