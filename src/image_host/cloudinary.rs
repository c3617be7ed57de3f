use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use super::error::UploadError;
use super::{ImageFile, ImageHost};

const DEFAULT_DELIVERY_BASE: &str = "https://res.cloudinary.com";

/// Unsigned uploads to a Cloudinary-compatible endpoint using a named preset.
#[derive(Debug, Clone)]
pub struct CloudinaryHost {
    http: reqwest::Client,
    base_url: String,
    delivery_base: String,
    cloud_name: String,
    upload_preset: String,
}

#[derive(Debug, Default, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    error: Option<UploadFailure>,
}

#[derive(Debug, Deserialize)]
struct UploadFailure {
    message: String,
}

impl CloudinaryHost {
    pub fn new(base_url: impl Into<String>, cloud_name: impl Into<String>, upload_preset: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            delivery_base: DEFAULT_DELIVERY_BASE.to_string(),
            cloud_name: cloud_name.into(),
            upload_preset: upload_preset.into(),
        }
    }

    pub fn with_delivery_base(mut self, delivery_base: impl Into<String>) -> Self {
        self.delivery_base = delivery_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn upload_url(&self) -> String {
        format!("{}/v1_1/{}/image/upload", self.base_url, self.cloud_name)
    }

    /// URL of a stored image resized to fill the given box.
    pub fn delivery_url(&self, public_id: &str, width: Option<u32>, height: Option<u32>) -> String {
        let mut transforms = Vec::new();
        if let Some(width) = width {
            transforms.push(format!("w_{width}"));
        }
        if let Some(height) = height {
            transforms.push(format!("h_{height}"));
        }
        transforms.extend(["c_fill", "q_auto", "f_auto"].map(String::from));

        format!(
            "{}/{}/image/upload/{}/{}",
            self.delivery_base,
            self.cloud_name,
            transforms.join(","),
            public_id
        )
    }
}

#[async_trait]
impl ImageHost for CloudinaryHost {
    #[instrument(skip(self, file), fields(file_name = %file.file_name, size = file.bytes.len()))]
    async fn upload(&self, file: ImageFile) -> Result<String, UploadError> {
        if file.bytes.is_empty() {
            return Err(UploadError::InvalidFile("empty file".to_string()));
        }
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| UploadError::InvalidFile(e.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        debug!("Sending upload");
        let response = self.http.post(self.upload_url()).multipart(form).send().await?;
        let status = response.status();
        let body: UploadResponse = response.json().await.unwrap_or_default();

        if !status.is_success() {
            let message = body
                .error
                .map(|failure| failure.message)
                .unwrap_or_else(|| format!("status {status}"));
            error!(%status, %message, "Image host rejected the upload");
            return Err(UploadError::Rejected(message));
        }

        let url = body.secure_url.filter(|url| !url.is_empty()).ok_or(UploadError::MissingUrl)?;
        info!(%url, "Image uploaded");
        Ok(url)
    }
}
