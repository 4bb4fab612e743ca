//! Image search command implementation.

use crate::api::{ApiClient, SearchBackend};
use crate::config::Config;
use crate::format::Formatter;
use crate::input::ImageUpload;
use crate::search::SearchController;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Searches for whatever the service recognises in an image.
pub struct ImageCommand {
    config: Config,
}

impl ImageCommand {
    /// Creates a new image command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Uploads the image at `path` and returns the resulting search.
    pub async fn execute(&self, path: &Path) -> Result<String> {
        let upload = ImageUpload::from_path(path).await.context("Failed to read image")?;
        let client = ApiClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_backend(Arc::new(client), upload).await
    }

    /// Runs the image search with a provided backend (for testing).
    pub async fn execute_with_backend<B: SearchBackend + 'static>(
        &self,
        backend: Arc<B>,
        upload: ImageUpload,
    ) -> Result<String> {
        info!("Image search with {} ({} bytes)", upload.file_name, upload.bytes.len());

        let controller = SearchController::new(backend, &self.config);
        if controller.image_search(upload).await.is_none() {
            let alert = controller.take_alert().unwrap_or_default();
            anyhow::bail!("{}", alert);
        }

        let formatter = Formatter::new(self.config.format, controller.messages());
        let results = formatter.format_results(&controller.view());
        Ok(format!("> {}\n\n{}", controller.state().query(), results))
    }
}
