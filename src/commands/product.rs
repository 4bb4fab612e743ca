//! Product detail command implementation.

use crate::api::{ApiClient, ProductId, SearchBackend};
use crate::config::{Config, OutputFormat};
use crate::format::Formatter;
use crate::modal::{DismissReason, ModalState, Viewport};
use crate::search::SearchController;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Shows product details by id, optionally within a search's results.
pub struct ProductCommand {
    config: Config,
}

impl ProductCommand {
    /// Creates a new product command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches one or more products and returns formatted output.
    pub async fn execute(&self, ids: &[String], within: Option<&str>) -> Result<String> {
        let client = ApiClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_backend(Arc::new(client), ids, within).await
    }

    /// Fetches products with a provided backend (for testing).
    ///
    /// With `within`, that query is searched first so a failed detail request
    /// can fall back to the matching result card.
    pub async fn execute_with_backend<B: SearchBackend + 'static>(
        &self,
        backend: Arc<B>,
        ids: &[String],
        within: Option<&str>,
    ) -> Result<String> {
        let ids: Vec<ProductId> = ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .filter_map(|id| id.parse().ok())
            .collect();
        if ids.is_empty() {
            anyhow::bail!("No product id given");
        }

        let controller = SearchController::new(backend, &self.config);
        if let Some(query) = within {
            controller.set_query(query).await;
        }

        let formatter = Formatter::new(self.config.format, controller.messages());
        let mut sections = Vec::new();
        let mut unavailable = 0;

        for id in ids {
            info!("Looking up product: {}", id);
            controller.show_product(id.clone(), Viewport::default()).await;

            let modal = controller.modal();
            if let ModalState::Unavailable(_) = modal.state() {
                warn!("No details for product {}", id);
                unavailable += 1;
            }
            sections.push(formatter.format_modal(&modal));
            controller.close_product(DismissReason::CloseButton);
        }

        if unavailable == sections.len() && sections.len() == 1 {
            anyhow::bail!("{}", controller.messages().details_unavailable);
        }

        let separator = match self.config.format {
            OutputFormat::Json => ",\n",
            OutputFormat::Markdown => "\n\n---\n\n",
            OutputFormat::Table => "\n\n",
        };
        let joined = sections.join(separator);
        if self.config.format == OutputFormat::Json && sections.len() > 1 {
            Ok(format!("[\n{}\n]", joined))
        } else {
            Ok(joined)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Named, PriceValue, Product};
    use crate::i18n::Language;
    use crate::test_support::{make_page, MockBackend};

    fn make_test_config() -> Config {
        Config { language: Language::En, ..Config::default() }
    }

    fn make_product(id: u64, title: &str) -> Product {
        Product {
            id: Some(ProductId::Number(id)),
            title: title.to_string(),
            price: Some(PriceValue::Amount(49.9)),
            availability: Some(true),
            shop: Some(Named::Plain("Public".to_string())),
            ..Default::default()
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_product_command_basic() {
        let backend = Arc::new(MockBackend::new().with_product(make_product(7, "Toaster")));
        let cmd = ProductCommand::new(make_test_config());

        let output = cmd.execute_with_backend(backend, &ids(&[" 7 "]), None).await.unwrap();
        assert!(output.contains("Toaster"));
        assert!(output.contains("€49.90"));
        assert!(output.contains("Public"));
    }

    #[tokio::test]
    async fn test_product_command_not_found() {
        let backend = Arc::new(MockBackend::new());
        let cmd = ProductCommand::new(make_test_config());

        let err = cmd.execute_with_backend(backend, &ids(&["404"]), None).await.unwrap_err();
        assert_eq!(err.to_string(), "Product details not available");
    }

    #[tokio::test]
    async fn test_product_command_empty_ids() {
        let backend = Arc::new(MockBackend::new());
        let cmd = ProductCommand::new(make_test_config());

        assert!(cmd.execute_with_backend(backend, &ids(&["", "  "]), None).await.is_err());
    }

    #[tokio::test]
    async fn test_product_command_falls_back_to_result_card() {
        let backend = Arc::new(MockBackend::new().with_page("mixer", make_page("Mixer", 3, 3, 1)));
        let cmd = ProductCommand::new(make_test_config());

        let output = cmd.execute_with_backend(backend, &ids(&["2"]), Some("mixer")).await.unwrap();
        assert!(output.starts_with("Product details from current search results"));
        assert!(output.contains("Mixer 2"));
    }

    #[tokio::test]
    async fn test_product_command_batch_keeps_going() {
        let backend = Arc::new(
            MockBackend::new()
                .with_product(make_product(1, "Kettle"))
                .with_product(make_product(3, "Iron")),
        );
        let cmd = ProductCommand::new(make_test_config());

        let output = cmd.execute_with_backend(backend, &ids(&["1", "2", "3"]), None).await.unwrap();
        assert!(output.contains("Kettle"));
        assert!(output.contains("Product details not available"));
        assert!(output.contains("Iron"));
    }

    #[tokio::test]
    async fn test_product_command_json_batch() {
        let backend = Arc::new(
            MockBackend::new()
                .with_product(make_product(1, "Kettle"))
                .with_product(make_product(2, "Iron")),
        );
        let config = Config { format: OutputFormat::Json, ..make_test_config() };
        let cmd = ProductCommand::new(config);

        let output = cmd.execute_with_backend(backend, &ids(&["1", "2"]), None).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["title"], "Kettle");
        assert_eq!(value[1]["title"], "Iron");
    }

    #[tokio::test]
    async fn test_product_command_markdown_format() {
        let backend = Arc::new(MockBackend::new().with_product(make_product(7, "Toaster")));
        let config = Config { format: OutputFormat::Markdown, ..make_test_config() };
        let cmd = ProductCommand::new(config);

        let output = cmd.execute_with_backend(backend, &ids(&["7"]), None).await.unwrap();
        assert!(output.starts_with("## Toaster"));
        assert!(output.contains("- **Shop:** Public"));
    }
}
