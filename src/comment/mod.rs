//! Comments on posts.

pub mod repository;
pub mod service;

pub use repository::CommentRepository;
pub use service::CommentService;

use sqlx::FromRow;

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Comment {
    /// Row id.
    pub id: i64,
    /// Post this comment belongs to.
    pub post_id: i64,
    /// Commenter's identity id. Nullable: historical rows exist without one.
    pub user_id: Option<String>,
    /// Commenter display name captured at creation time.
    pub author_name: Option<String>,
    /// Comment text.
    pub body: String,
    /// Public URL of the attached image, if any.
    pub image_url: Option<String>,
    /// Creation timestamp in storage format (UTC).
    pub created_at: String,
    /// Set when the comment has been edited.
    pub edited_at: Option<String>,
}

/// Fields for creating a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub user_id: String,
    pub author_name: String,
    pub body: String,
    pub image_url: Option<String>,
}
