use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

use crate::config;

static DATA_URI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:image/([a-zA-Z0-9]+);base64,").unwrap());

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Extension of image not found. Check provided image")]
    ExtensionNotFound,

    #[error("Extension of image {0} not support, pls provide correct one")]
    UnsupportedExtension(String),

    #[error("Cant decode provided image. Please check data correctness")]
    InvalidImage,

    #[error("Image exceeds the maximum allowed size of {0} bytes")]
    TooLarge(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Filesystem store for uploaded catalog images. Payloads arrive as
/// `data:image/<ext>;base64,` URIs; saved files get uuid names and are
/// served back under the configured static path.
#[derive(Debug, Clone)]
pub struct ImageStore {
    path: PathBuf,
    extensions: Vec<String>,
    max_bytes: usize,
}

impl ImageStore {
    pub fn new(path: impl Into<PathBuf>, extensions: Vec<String>, max_bytes: usize) -> Self {
        Self {
            path: path.into(),
            extensions,
            max_bytes,
        }
    }

    pub fn from_config() -> Self {
        let cfg = &config::config().storage;
        Self::new(
            &cfg.image_path,
            cfg.image_extensions.clone(),
            cfg.max_image_bytes,
        )
    }

    /// URL prefix catalog responses prepend to stored filenames.
    pub fn url_prefix(&self) -> String {
        format!("/{}/", self.path.display())
    }

    /// Pull the extension out of a `data:image/<ext>;base64,` prefix.
    pub fn extension(&self, data_uri: &str) -> Result<String, StorageError> {
        DATA_URI_RE
            .captures(data_uri)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_lowercase())
            .ok_or(StorageError::ExtensionNotFound)
    }

    pub fn is_supported(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| e == extension)
    }

    /// Decode and persist an image, returning the generated filename.
    pub async fn save(&self, extension: &str, data_uri: &str) -> Result<String, StorageError> {
        if !self.is_supported(extension) {
            return Err(StorageError::UnsupportedExtension(extension.to_string()));
        }

        let prefix = format!("data:image/{};base64,", extension);
        let encoded = data_uri.strip_prefix(&prefix).unwrap_or(data_uri);

        let data = BASE64
            .decode(encoded.trim())
            .map_err(|_| StorageError::InvalidImage)?;

        if data.len() > self.max_bytes {
            return Err(StorageError::TooLarge(self.max_bytes));
        }

        if !looks_like_image(&data) {
            return Err(StorageError::InvalidImage);
        }

        let filename = format!("{}.{}", Uuid::new_v4(), extension);

        tokio::fs::create_dir_all(&self.path).await?;
        tokio::fs::write(self.path.join(&filename), &data).await?;

        Ok(filename)
    }

    pub fn dir(&self) -> &Path {
        &self.path
    }
}

/// Magic-byte check over the supported formats (jpeg, png, gif, webp).
fn looks_like_image(data: &[u8]) -> bool {
    if data.len() < 12 {
        return false;
    }
    data.starts_with(&[0xFF, 0xD8, 0xFF])
        || data.starts_with(&[0x89, b'P', b'N', b'G'])
        || data.starts_with(b"GIF8")
        || (data.starts_with(b"RIFF") && &data[8..12] == b"WEBP")
}
