//! Post write service: validation, image handling, and persistence.

use std::sync::Arc;

use tracing::info;

use super::{NewPost, Post, PostRepository, PostUpdate};
use crate::auth::{display_name, IdentityProvider, POST_AUTHOR_FALLBACK};
use crate::error::{BlogError, Result};
use crate::image::ImageUpload;
use crate::storage::{ObjectStore, POST_IMAGES_BUCKET};

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 50;

/// Maximum content length in characters.
pub const CONTENT_MAX: usize = 100;

/// Service coordinating post writes.
#[derive(Clone)]
pub struct PostService {
    repo: PostRepository,
    identity: Arc<dyn IdentityProvider>,
    storage: Arc<dyn ObjectStore>,
}

/// Validate title and content. Both are expected pre-trimmed.
///
/// Presence is checked before length, so an empty title with an overlong
/// content reports the presence error.
pub fn validate_post(title: &str, content: &str) -> Result<()> {
    if title.is_empty() || content.is_empty() {
        return Err(BlogError::Validation(
            "Title and content are required.".to_string(),
        ));
    }
    if title.chars().count() > TITLE_MAX {
        return Err(BlogError::Validation(
            "Title must be 50 characters or less.".to_string(),
        ));
    }
    if content.chars().count() > CONTENT_MAX {
        return Err(BlogError::Validation(
            "Content must be 100 characters or less.".to_string(),
        ));
    }
    Ok(())
}

impl PostService {
    pub fn new(
        repo: PostRepository,
        identity: Arc<dyn IdentityProvider>,
        storage: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            repo,
            identity,
            storage,
        }
    }

    /// Create a post for `owner_id`, storing the image first if present.
    ///
    /// Validation runs before any upload, so invalid input never leaves an
    /// orphaned object behind.
    pub async fn create(
        &self,
        owner_id: &str,
        title: &str,
        content: &str,
        image: Option<ImageUpload>,
    ) -> Result<Post> {
        let title = title.trim();
        let content = content.trim();
        validate_post(title, content)?;
        if let Some(image) = &image {
            image.validate()?;
        }

        let image_url = match image {
            Some(image) => Some(self.store_image(owner_id, &image).await?),
            None => None,
        };

        let author_name = self.author_name(owner_id).await?;

        let post = self
            .repo
            .create(&NewPost {
                user_id: owner_id.to_string(),
                title: title.to_string(),
                content: content.to_string(),
                author_name,
                image_url,
            })
            .await?;

        info!("User {} created post {}", owner_id, post.id);
        Ok(post)
    }

    /// Update a post owned by `owner_id`. A missing image keeps the stored
    /// one. Rows owned by someone else report not found.
    pub async fn update(
        &self,
        id: i64,
        owner_id: &str,
        title: &str,
        content: &str,
        image: Option<ImageUpload>,
    ) -> Result<Post> {
        let title = title.trim();
        let content = content.trim();
        validate_post(title, content)?;
        if let Some(image) = &image {
            image.validate()?;
        }

        let image_url = match image {
            Some(image) => Some(self.store_image(owner_id, &image).await?),
            None => None,
        };

        self.repo
            .update(
                id,
                owner_id,
                &PostUpdate {
                    title: title.to_string(),
                    content: content.to_string(),
                    image_url,
                },
            )
            .await?
            .ok_or_else(|| BlogError::NotFound("Post".to_string()))
    }

    /// Delete a post owned by `owner_id`.
    pub async fn delete(&self, id: i64, owner_id: &str) -> Result<()> {
        if !self.repo.delete(id, owner_id).await? {
            return Err(BlogError::NotFound("Post".to_string()));
        }
        info!("User {} deleted post {}", owner_id, id);
        Ok(())
    }

    async fn store_image(&self, owner_id: &str, image: &ImageUpload) -> Result<String> {
        let path = image.object_path(owner_id);
        self.storage
            .upload(
                POST_IMAGES_BUCKET,
                &path,
                &image.data,
                &image.effective_content_type(),
            )
            .await?;
        Ok(self.storage.public_url(POST_IMAGES_BUCKET, &path))
    }

    async fn author_name(&self, owner_id: &str) -> Result<String> {
        let user = self
            .identity
            .get_user(owner_id)
            .await
            .map_err(|e| BlogError::Auth(e.to_string()))?;

        Ok(user
            .map(|u| display_name(&u, POST_AUTHOR_FALLBACK))
            .unwrap_or_else(|| POST_AUTHOR_FALLBACK.to_string()))
    }
}
