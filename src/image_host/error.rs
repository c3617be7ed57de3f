use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Upload request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Image host rejected the upload: {0}")]
    Rejected(String),
    #[error("Image host returned no secure URL")]
    MissingUrl,
    #[error("Invalid image file: {0}")]
    InvalidFile(String),
}
