//! API handlers.

pub mod auth;
pub mod comment;
pub mod feed;
pub mod post;

pub use auth::*;
pub use comment::*;
pub use feed::*;
pub use post::*;

use axum::extract::multipart::Multipart;

use crate::image::ImageUpload;
use crate::web::error::ApiError;

/// Read the next multipart field's bytes, mapping transport errors.
async fn field_bytes(field: axum::extract::multipart::Field<'_>) -> Result<Vec<u8>, ApiError> {
    field
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart field: {e}")))
}

/// Parsed post form: title, content, optional image.
pub(crate) struct PostForm {
    pub title: String,
    pub content: String,
    pub image: Option<ImageUpload>,
}

/// Parse a post create/update form.
///
/// An image part with no filename and no bytes is what browsers send for an
/// untouched file input; it is treated as absent.
pub(crate) async fn parse_post_form(mut multipart: Multipart) -> Result<PostForm, ApiError> {
    let mut title = String::new();
    let mut content = String::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {e}")))?
    {
        match field.name().unwrap_or("") {
            "title" => {
                title = String::from_utf8_lossy(&field_bytes(field).await?).into_owned();
            }
            "content" => {
                content = String::from_utf8_lossy(&field_bytes(field).await?).into_owned();
            }
            "image" => {
                image = parse_image_field(field).await?;
            }
            _ => {}
        }
    }

    Ok(PostForm {
        title,
        content,
        image,
    })
}

/// Parsed comment form: body, optional image.
pub(crate) struct CommentForm {
    pub body: String,
    pub image: Option<ImageUpload>,
}

/// Parse a comment create form.
pub(crate) async fn parse_comment_form(mut multipart: Multipart) -> Result<CommentForm, ApiError> {
    let mut body = String::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {e}")))?
    {
        match field.name().unwrap_or("") {
            "body" => {
                body = String::from_utf8_lossy(&field_bytes(field).await?).into_owned();
            }
            "image" => {
                image = parse_image_field(field).await?;
            }
            _ => {}
        }
    }

    Ok(CommentForm { body, image })
}

async fn parse_image_field(
    field: axum::extract::multipart::Field<'_>,
) -> Result<Option<ImageUpload>, ApiError> {
    let filename = field.file_name().map(String::from);
    let content_type = field.content_type().map(String::from);
    let data = field_bytes(field).await?;

    if data.is_empty() && filename.as_deref().unwrap_or("").is_empty() {
        return Ok(None);
    }

    Ok(Some(ImageUpload {
        filename,
        content_type,
        data,
    }))
}
