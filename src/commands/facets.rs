//! Facet listing command implementation.

use crate::api::{ApiClient, SearchBackend};
use crate::config::Config;
use crate::filters::FacetKind;
use crate::format::Formatter;
use crate::search::SearchController;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

/// Shows the catalogue-wide filter sidebar.
pub struct FacetsCommand {
    config: Config,
}

impl FacetsCommand {
    /// Creates a new facets command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Loads facets, narrowing each list by the given local search text.
    pub async fn execute(&self, narrow: &[(FacetKind, String)]) -> Result<String> {
        let client = ApiClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_backend(Arc::new(client), narrow).await
    }

    /// Loads facets with a provided backend (for testing).
    pub async fn execute_with_backend<B: SearchBackend + 'static>(
        &self,
        backend: Arc<B>,
        narrow: &[(FacetKind, String)],
    ) -> Result<String> {
        let controller = SearchController::new(backend, &self.config);

        if !controller.load_facets().await {
            anyhow::bail!("Failed to load facets from {}", self.config.base_url);
        }

        for (kind, text) in narrow {
            debug!("Narrowing {:?} to {:?}", kind, text);
            controller.set_facet_search(*kind, text);
        }

        let formatter = Formatter::new(self.config.format, controller.messages());
        Ok(formatter.format_facets(&controller.facet_panel(), controller.state().filters()))
    }
}
