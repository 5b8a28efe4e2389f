//! Image upload validation and object naming.
//!
//! Shared by post and comment attachments. Only the MIME type prefix and
//! size are checked; content sniffing is out of scope.

use uuid::Uuid;

use crate::error::{BlogError, Result};

/// Maximum accepted image size in bytes (2 MiB).
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Extension used when the filename carries none.
const DEFAULT_EXTENSION: &str = "jpg";

/// An image received from a multipart upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-supplied filename, if any.
    pub filename: Option<String>,
    /// Client-supplied content type, if any.
    pub content_type: Option<String>,
    /// Raw bytes.
    pub data: Vec<u8>,
}

impl ImageUpload {
    /// Validate type and size.
    pub fn validate(&self) -> Result<()> {
        let is_image = self
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"));
        if !is_image {
            return Err(BlogError::Validation("Image file only.".to_string()));
        }

        if self.data.len() > MAX_IMAGE_BYTES {
            return Err(BlogError::Validation(
                "Image is too large. Max 2MB.".to_string(),
            ));
        }

        Ok(())
    }

    /// Content type to store the object with, falling back to a filename
    /// guess and then to a generic binary type.
    pub fn effective_content_type(&self) -> String {
        if let Some(ct) = &self.content_type {
            return ct.clone();
        }
        self.filename
            .as_deref()
            .map(|name| mime_guess::from_path(name).first_or_octet_stream().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string())
    }

    /// Object path for this upload: `{owner_id}/{uuid}.{ext}`.
    pub fn object_path(&self, owner_id: &str) -> String {
        let ext = self
            .filename
            .as_deref()
            .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext))
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or(DEFAULT_EXTENSION);
        format!("{}/{}.{}", owner_id, Uuid::new_v4(), ext.to_ascii_lowercase())
    }
}
