//! Comment write service.

use std::sync::Arc;

use tracing::info;

use super::{Comment, CommentRepository, NewComment};
use crate::auth::{display_name, IdentityProvider, COMMENT_AUTHOR_FALLBACK};
use crate::error::{BlogError, Result};
use crate::image::ImageUpload;
use crate::storage::{ObjectStore, COMMENT_IMAGES_BUCKET};

/// Service coordinating comment writes.
#[derive(Clone)]
pub struct CommentService {
    repo: CommentRepository,
    identity: Arc<dyn IdentityProvider>,
    storage: Arc<dyn ObjectStore>,
}

/// Validate a comment body. Expected pre-trimmed.
pub fn validate_comment(body: &str) -> Result<()> {
    if body.is_empty() {
        return Err(BlogError::Validation("Comment is required.".to_string()));
    }
    Ok(())
}

impl CommentService {
    pub fn new(
        repo: CommentRepository,
        identity: Arc<dyn IdentityProvider>,
        storage: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            repo,
            identity,
            storage,
        }
    }

    /// List a post's comments, newest first.
    pub async fn list(&self, post_id: i64) -> Result<Vec<Comment>> {
        self.repo.list_for_post(post_id).await
    }

    /// Create a comment on `post_id` for `owner_id`.
    pub async fn create(
        &self,
        post_id: i64,
        owner_id: &str,
        body: &str,
        image: Option<ImageUpload>,
    ) -> Result<Comment> {
        let body = body.trim();
        validate_comment(body)?;
        if let Some(image) = &image {
            image.validate()?;
        }

        let image_url = match image {
            Some(image) => {
                let path = image.object_path(owner_id);
                self.storage
                    .upload(
                        COMMENT_IMAGES_BUCKET,
                        &path,
                        &image.data,
                        &image.effective_content_type(),
                    )
                    .await?;
                Some(self.storage.public_url(COMMENT_IMAGES_BUCKET, &path))
            }
            None => None,
        };

        let author_name = self.author_name(owner_id).await?;

        let comment = self
            .repo
            .create(&NewComment {
                post_id,
                user_id: owner_id.to_string(),
                author_name,
                body: body.to_string(),
                image_url,
            })
            .await?;

        info!("User {} commented on post {}", owner_id, post_id);
        Ok(comment)
    }

    /// Edit a comment owned by `owner_id`. Rows owned by someone else
    /// report not found.
    pub async fn update(&self, id: i64, owner_id: &str, body: &str) -> Result<Comment> {
        let body = body.trim();
        validate_comment(body)?;

        self.repo
            .update(id, owner_id, body)
            .await?
            .ok_or_else(|| BlogError::NotFound("Comment".to_string()))
    }

    /// Delete a comment owned by `owner_id`.
    pub async fn delete(&self, id: i64, owner_id: &str) -> Result<()> {
        if !self.repo.delete(id, owner_id).await? {
            return Err(BlogError::NotFound("Comment".to_string()));
        }
        Ok(())
    }

    async fn author_name(&self, owner_id: &str) -> Result<String> {
        let user = self
            .identity
            .get_user(owner_id)
            .await
            .map_err(|e| BlogError::Auth(e.to_string()))?;

        Ok(user
            .map(|u| display_name(&u, COMMENT_AUTHOR_FALLBACK))
            .unwrap_or_else(|| COMMENT_AUTHOR_FALLBACK.to_string()))
    }
}
