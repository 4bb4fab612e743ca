//! Non-text query sources: voice transcripts and image uploads.

use crate::api::{ApiError, ApiResult};
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// A speech-to-text capability.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Listens once and returns the recognised transcript.
    async fn transcribe(&self) -> ApiResult<String>;
}

/// Recognizer for environments without speech support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeechSupport;

#[async_trait]
impl SpeechRecognizer for NoSpeechSupport {
    async fn transcribe(&self) -> ApiResult<String> {
        Err(ApiError::Unsupported("speech recognition"))
    }
}

/// An image selected for `/image-search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes }
    }

    /// Reads an image from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        debug!("Reading image: {}", path.display());

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ApiError::Io { path: path.display().to_string(), source })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self { file_name, bytes })
    }
}
