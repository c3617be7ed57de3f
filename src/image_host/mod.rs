//! Image uploads for category, item, logo and hero pictures.
//!
//! Only the returned URL is ever stored; image bytes never reach the data store.

mod cloudinary;
mod error;

pub use cloudinary::CloudinaryHost;
pub use error::UploadError;

use async_trait::async_trait;

/// A picture selected in an admin form.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Uploads the file and returns its public https URL.
    async fn upload(&self, file: ImageFile) -> Result<String, UploadError>;
}
