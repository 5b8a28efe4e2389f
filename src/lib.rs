//! Blogun - a small blogging service.
//!
//! Server-rendered blog backend: accounts, posts with optional images,
//! comments, and a paginated, searchable public feed.

pub mod auth;
pub mod comment;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod format;
pub mod image;
pub mod logging;
pub mod post;
pub mod storage;
pub mod web;

pub use auth::{
    display_name, email_exists, AuthError, IdentityProvider, IdentityUser, LocalIdentityProvider,
    COMMENT_AUTHOR_FALLBACK, POST_AUTHOR_FALLBACK,
};
pub use comment::{Comment, CommentRepository, CommentService, NewComment};
pub use config::Config;
pub use db::Database;
pub use error::{BlogError, Result};
pub use format::{excerpt, highlight, Segment, EXCERPT_MAX};
pub use image::{ImageUpload, MAX_IMAGE_BYTES};
pub use post::{
    FeedPage, FeedQuery, NewPost, Post, PostRepository, PostService, PostUpdate, PAGE_SIZE,
};
pub use storage::{FsObjectStore, ObjectStore, COMMENT_IMAGES_BUCKET, POST_IMAGES_BUCKET};
pub use web::WebServer;
