//! Conversion of uploaded images into inline data URLs.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use super::error::{ServiceError, ServiceResult};

const FALLBACK_MIME: &str = "application/octet-stream";

/// Raw image bytes as supplied by the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    #[serde(default)]
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
pub trait ImageEncoder: Send + Sync {
    async fn encode(&self, image: &ImagePayload) -> ServiceResult<String>;
}

/// Encodes images as `data:<mime>;base64,<payload>`.
#[derive(Debug, Clone, Default)]
pub struct DataUrlEncoder;

#[async_trait]
impl ImageEncoder for DataUrlEncoder {
    async fn encode(&self, image: &ImagePayload) -> ServiceResult<String> {
        let mime = image.mime_type.trim();
        if mime.contains(|c: char| c == ';' || c == ',') {
            return Err(ServiceError::ImageEncoding(format!(
                "unsupported MIME type {mime:?}"
            )));
        }
        let mime = if mime.is_empty() { FALLBACK_MIME } else { mime };
        Ok(format!("data:{mime};base64,{}", STANDARD.encode(&image.bytes)))
    }
}
