//! Search command implementation.

use crate::api::{ApiClient, SearchBackend};
use crate::config::Config;
use crate::filters::{FacetKind, FilterChange, PriceRange};
use crate::format::Formatter;
use crate::search::{Action, SearchController, SearchOutcome, SearchType, SortKey};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Query, page and filters for one search.
#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    pub query: String,
    pub page: u32,
    pub sort: SortKey,
    pub products_only: bool,
    pub brands: Vec<String>,
    pub categories: Vec<String>,
    pub shops: Vec<String>,
    pub available_only: bool,
    pub in_stock: bool,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Append the facet sidebar to the output
    pub show_facets: bool,
}

impl SearchArgs {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), page: 1, ..Default::default() }
    }

    /// State changes that reproduce these arguments on a fresh controller.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = vec![Action::SetQuery(self.query.clone()), Action::SetSort(self.sort)];

        if self.products_only {
            actions.push(Action::SetSearchType(SearchType::Products));
        }

        let facets = [
            (FacetKind::Brand, &self.brands),
            (FacetKind::Category, &self.categories),
            (FacetKind::Shop, &self.shops),
        ];
        for (kind, values) in facets {
            for value in values.iter().filter(|v| !v.trim().is_empty()) {
                actions.push(Action::ChangeFilter(FilterChange::select(kind, value.trim())));
            }
        }

        if self.available_only {
            actions.push(Action::ChangeFilter(FilterChange::AvailableOnly(true)));
        }
        if self.in_stock {
            actions.push(Action::ChangeFilter(FilterChange::InStock(true)));
        }

        let price = PriceRange::new(self.min_price, self.max_price);
        if !price.is_empty() {
            actions.push(Action::ChangeFilter(FilterChange::Price(price)));
        }

        actions
    }
}

/// Executes a product search.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the search and returns formatted output.
    pub async fn execute(&self, args: &SearchArgs) -> Result<String> {
        let client = ApiClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_backend(Arc::new(client), args).await
    }

    /// Executes the search with a provided backend (for testing).
    pub async fn execute_with_backend<B: SearchBackend + 'static>(
        &self,
        backend: Arc<B>,
        args: &SearchArgs,
    ) -> Result<String> {
        info!("Searching for: {:?}", args.query);

        let controller = SearchController::new(backend, &self.config);
        let actions = args.actions();
        debug!("Applying {} state changes", actions.len());

        let outcome = controller.run(actions, args.page.max(1)).await;
        if let SearchOutcome::Failed(e) = &outcome {
            debug!("Search failed: {}", e);
        }

        let formatter = Formatter::new(self.config.format, controller.messages());
        let mut output = formatter.format_results(&controller.view());

        if args.show_facets && outcome.is_applied() {
            let panel = formatter.format_facets(&controller.facet_panel(), controller.state().filters());
            if !panel.is_empty() {
                output.push_str("\n\n");
                output.push_str(&panel);
            }
        }

        Ok(output)
    }
}
