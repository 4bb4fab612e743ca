//! What the results area currently shows.

use crate::api::{CategoryHit, Product, ProductId, ResultsPage};
use crate::filters::ActiveFilter;
use crate::format::pagination::Pagination;
use crate::i18n::Messages;
use serde::Serialize;

/// Count and page indicator of the latest successful response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultStats {
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
}

/// Results area view model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultsView {
    pub loading: bool,
    /// Error banner text
    pub error: Option<String>,
    /// Page being displayed; `None` before the first search and after a failure
    pub results: Option<ResultsPage>,
    pub stats: Option<ResultStats>,
    /// Category matches for the current free text
    pub categories: Vec<CategoryHit>,
    pub active_filters: Vec<ActiveFilter>,
    pub elapsed_ms: Option<u64>,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// A request went out.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(
        &mut self,
        page: ResultsPage,
        categories: Vec<CategoryHit>,
        active_filters: Vec<ActiveFilter>,
        elapsed_ms: u64,
    ) {
        let total_pages = if page.total_pages > 0 {
            page.total_pages
        } else {
            page.per_page
                .filter(|n| *n > 0)
                .map(|n| u32::try_from(page.total.div_ceil(u64::from(n))).unwrap_or(u32::MAX))
                .unwrap_or(1)
        };
        self.stats = Some(ResultStats { total: page.total, page: page.page, total_pages });
        self.results = Some(page);
        self.categories = categories;
        self.active_filters = active_filters;
        self.elapsed_ms = Some(elapsed_ms);
        self.error = None;
        self.loading = false;
    }

    /// Category matches arrive after the results they belong to.
    pub fn set_categories(&mut self, categories: Vec<CategoryHit>) {
        self.categories = categories;
    }

    /// Shows the error banner over an empty result list. Stats are kept.
    pub fn fail(&mut self, message: &str, active_filters: Vec<ActiveFilter>) {
        self.results = None;
        self.categories.clear();
        self.active_filters = active_filters;
        self.error = Some(message.to_string());
        self.loading = false;
    }

    pub fn products(&self) -> &[Product] {
        self.results.as_ref().map(|r| r.products.as_slice()).unwrap_or(&[])
    }

    /// True when the latest search succeeded with nothing to show.
    pub fn is_no_results(&self) -> bool {
        !self.loading && self.error.is_none() && self.results.as_ref().is_some_and(|r| r.is_empty())
    }

    /// Pagination for the displayed page; none for empty or failed searches.
    pub fn pagination(&self) -> Option<Pagination> {
        let results = self.results.as_ref().filter(|r| !r.is_empty())?;
        let stats = self.stats?;
        Pagination::new(results.page, stats.total_pages)
    }

    /// A visible card for `id`, used when the detail endpoint fails.
    pub fn find_card(&self, id: &ProductId) -> Option<&Product> {
        self.results.as_ref()?.find(id)
    }

    /// `12,345 results · Page 2 of 7`.
    pub fn stats_line(&self, messages: &Messages) -> Option<String> {
        let stats = self.stats?;
        let mut line = messages.result_count(stats.total);
        if stats.total_pages > 1 {
            line.push_str(" · ");
            line.push_str(&messages.page_of(stats.page, stats.total_pages));
        }
        if let Some(ms) = self.elapsed_ms {
            line.push_str(&format!(" ({} ms)", ms));
        }
        Some(line)
    }
}
