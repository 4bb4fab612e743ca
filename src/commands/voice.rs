//! Voice search command implementation.

use crate::api::{ApiClient, SearchBackend};
use crate::config::Config;
use crate::format::Formatter;
use crate::input::{NoSpeechSupport, SpeechRecognizer};
use crate::search::SearchController;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Searches for a spoken query.
pub struct VoiceCommand {
    config: Config,
}

impl VoiceCommand {
    /// Creates a new voice command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Listens with the platform recognizer. None is built in, so this reports
    /// that speech input is unsupported.
    pub async fn execute(&self) -> Result<String> {
        let client = ApiClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_backend(Arc::new(client), &NoSpeechSupport).await
    }

    /// Runs a voice search with a provided backend and recognizer (for testing).
    pub async fn execute_with_backend<B: SearchBackend + 'static>(
        &self,
        backend: Arc<B>,
        recognizer: &dyn SpeechRecognizer,
    ) -> Result<String> {
        let controller = SearchController::new(backend, &self.config);
        if controller.voice_search(recognizer).await.is_none() {
            let alert = controller.take_alert().unwrap_or_default();
            anyhow::bail!("{}", alert);
        }

        let formatter = Formatter::new(self.config.format, controller.messages());
        let results = formatter.format_results(&controller.view());
        Ok(format!("> {}\n\n{}", controller.state().query(), results))
    }
}
