use std::path::Path;
use crate::errors::{ClientError, ClientResult};

pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

/// A diagram picked by the user and held in memory until it is submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    pub fn new(file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> ClientResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "diagram".to_string());
        let mime_type = Self::mime_for_path(path).to_string();

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    pub fn mime_for_path(path: &Path) -> &'static str {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "webp" => "image/webp",
            _ => "application/octet-stream",
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn validate(&self, max_upload_size_mb: u64) -> ClientResult<()> {
        if !ALLOWED_IMAGE_TYPES.contains(&self.mime_type.as_str()) {
            return Err(ClientError::validation_error(
                "file",
                &self.file_name,
                &format!("invalid file type {}", self.mime_type),
                Some("Allowed: image/png, image/jpeg, image/webp"),
            ));
        }
        if self.bytes.is_empty() {
            return Err(ClientError::validation_error("file", &self.file_name, "file is empty", None));
        }
        let max_bytes = max_upload_size_mb.saturating_mul(1024 * 1024);
        if self.bytes.len() as u64 > max_bytes {
            return Err(ClientError::validation_error(
                "file",
                &self.file_name,
                &format!("file too large, maximum is {}MB", max_upload_size_mb),
                None,
            ));
        }
        Ok(())
    }
}
