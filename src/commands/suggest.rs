//! Suggestion command implementation.

use crate::api::{ApiClient, SearchBackend};
use crate::config::Config;
use crate::format::Formatter;
use crate::search::{SearchController, SearchOutcome};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Lists type-ahead suggestions, optionally running the chosen one.
pub struct SuggestCommand {
    config: Config,
}

impl SuggestCommand {
    /// Creates a new suggest command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches suggestions for `text`. `pick` is a 1-based item to search for.
    pub async fn execute(&self, text: &str, pick: Option<usize>) -> Result<String> {
        let client = ApiClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_backend(Arc::new(client), text, pick).await
    }

    /// Fetches suggestions with a provided backend (for testing).
    pub async fn execute_with_backend<B: SearchBackend + 'static>(
        &self,
        backend: Arc<B>,
        text: &str,
        pick: Option<usize>,
    ) -> Result<String> {
        info!("Suggestions for: {:?}", text);

        let controller = SearchController::new(backend, &self.config);
        let formatter = Formatter::new(self.config.format, controller.messages());
        let dropdown = controller.suggestions().fetch_now(text).await;

        let Some(pick) = pick else {
            return Ok(formatter.format_suggestions(&dropdown));
        };

        let index = pick.checked_sub(1).filter(|i| *i < dropdown.items().len());
        let Some(index) = index else {
            anyhow::bail!("No suggestion #{} ({} available)", pick, dropdown.items().len());
        };

        match controller.select_suggestion(index).await {
            Some(SearchOutcome::Superseded) | None => {
                anyhow::bail!("Suggestion #{} could not be applied", pick)
            }
            Some(_) => Ok(formatter.format_results(&controller.view())),
        }
    }
}
