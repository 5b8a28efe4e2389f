//! Object storage for uploaded images.
//!
//! Handlers depend on the [`ObjectStore`] trait; [`FsObjectStore`] keeps
//! objects on the local filesystem under `<base>/<bucket>/<path>` and serves
//! them back through the static file route.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{BlogError, Result};

/// Bucket for post images.
pub const POST_IMAGES_BUCKET: &str = "post-images";

/// Bucket for comment images.
pub const COMMENT_IMAGES_BUCKET: &str = "comment-images";

/// Object storage contract.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `content` under `bucket/path`. Fails if the object exists.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<()>;

    /// Public URL for the object at `bucket/path`.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// Filesystem-backed object store.
pub struct FsObjectStore {
    base_path: PathBuf,
    public_base: String,
}

impl FsObjectStore {
    /// Create a store rooted at `base_path`, serving objects under
    /// `public_base` (for example `/files`).
    pub fn new(base_path: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve `bucket/path` to a filesystem location.
    ///
    /// Rejects empty, absolute, and parent-traversing components.
    fn resolve(&self, bucket: &str, path: &str) -> Result<PathBuf> {
        validate_component(bucket)?;

        let rel = Path::new(path);
        if path.is_empty()
            || rel.components().any(|c| {
                !matches!(c, Component::Normal(_))
            })
        {
            return Err(BlogError::Storage(format!("invalid object path: {path:?}")));
        }

        Ok(self.base_path.join(bucket).join(rel))
    }
}

fn validate_component(bucket: &str) -> Result<()> {
    if bucket.is_empty()
        || bucket
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
    {
        return Err(BlogError::Storage(format!("invalid bucket name: {bucket:?}")));
    }
    Ok(())
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<()> {
        let target = self.resolve(bucket, path)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        if tokio::fs::try_exists(&target).await? {
            return Err(BlogError::Storage(format!(
                "object already exists: {bucket}/{path}"
            )));
        }

        tokio::fs::write(&target, content).await?;
        debug!(
            "Stored {} bytes at {}/{} ({})",
            content.len(),
            bucket,
            path,
            content_type
        );

        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{}/{}", self.public_base, bucket, path)
    }
}
