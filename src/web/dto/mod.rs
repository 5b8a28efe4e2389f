//! Data transfer objects for the Web API.

pub mod request;
pub mod response;

pub use request::{CommentUpdateRequest, FeedParams, LoginRequest, RegisterRequest};
pub use response::{
    ApiResponse, CommentResponse, FeedItemResponse, LoginResponse, PaginatedResponse,
    PaginationMeta, PostResponse, UserInfo,
};
