//! Output formatting for view models (table, JSON, markdown).

pub mod card;
pub mod pagination;
pub mod price;

pub use card::ProductCard;
pub use pagination::{PageItem, Pagination};

use crate::api::{CategoryHit, Product};
use crate::config::OutputFormat;
use crate::filters::{FacetKind, FacetPanel, FilterSet};
use crate::i18n::Messages;
use crate::modal::{ModalState, ProductModal};
use crate::search::{ResultStats, ResultsView};
use crate::suggest::{SuggestionAction, SuggestionDropdown};
use serde::Serialize;

/// Formats view models for output.
pub struct Formatter {
    format: OutputFormat,
    messages: &'static Messages,
}

#[derive(Serialize)]
struct ResultsOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<ResultStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<u64>,
    products: Vec<ProductCard>,
    categories: &'a [CategoryHit],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    active_filters: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination: Option<Pagination>,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat, messages: &'static Messages) -> Self {
        Self { format, messages }
    }

    fn cards(&self, products: &[Product]) -> Vec<ProductCard> {
        products.iter().map(|p| ProductCard::new(p, self.messages)).collect()
    }

    /// Formats the results area: banner or stats, chips, categories, cards and pagination.
    pub fn format_results(&self, view: &ResultsView) -> String {
        match self.format {
            OutputFormat::Json => self.json_results(view),
            OutputFormat::Table => self.table_results(view),
            OutputFormat::Markdown => self.markdown_results(view),
        }
    }

    /// Formats the product modal.
    pub fn format_modal(&self, modal: &ProductModal) -> String {
        match modal.state() {
            ModalState::Closed => String::new(),
            ModalState::Loading(_) => self.messages.loading.to_string(),
            ModalState::Unavailable(id) => match self.format {
                OutputFormat::Json => serde_json::json!({ "id": id, "error": self.messages.details_unavailable })
                    .to_string(),
                _ => self.messages.details_unavailable.to_string(),
            },
            ModalState::Loaded(product) => self.format_product(product),
            ModalState::FromCard(product) => match self.format {
                OutputFormat::Json => self.format_product(product),
                _ => format!("{}\n\n{}", self.messages.details_from_results, self.format_product(product)),
            },
        }
    }

    /// Formats one product in full.
    pub fn format_product(&self, product: &Product) -> String {
        match self.format {
            OutputFormat::Json => json_pretty(product, "{}"),
            OutputFormat::Table => self.table_product(product),
            OutputFormat::Markdown => self.markdown_product(product),
        }
    }

    /// Formats the suggestion dropdown.
    pub fn format_suggestions(&self, dropdown: &SuggestionDropdown) -> String {
        if self.format == OutputFormat::Json {
            return json_pretty(&dropdown.items(), "[]");
        }
        if dropdown.is_empty() {
            return String::new();
        }

        let bullet = if self.format == OutputFormat::Markdown { "- " } else { "  " };
        let mut lines = vec![format!("{}:", self.messages.suggestions)];
        for (i, item) in dropdown.items().iter().enumerate() {
            let line = match (&item.action, item.count) {
                (SuggestionAction::Category(_), Some(count)) => format!(
                    "{}{}. {} [{}] ({} {})",
                    bullet,
                    i + 1,
                    item.label,
                    self.messages.category,
                    count,
                    self.messages.products
                ),
                _ => format!("{}{}. {}", bullet, i + 1, item.label),
            };
            lines.push(line);
        }
        lines.join("\n")
    }

    /// Formats the facet sidebar with selection marks.
    pub fn format_facets(&self, panel: &FacetPanel, filters: &FilterSet) -> String {
        if self.format == OutputFormat::Json {
            let mut value = serde_json::Map::new();
            for kind in FacetKind::all() {
                let rows: Vec<_> = panel
                    .list(kind)
                    .rows(filters)
                    .into_iter()
                    .map(|r| serde_json::json!({ "key": r.key, "count": r.count, "checked": r.checked }))
                    .collect();
                value.insert(kind.param().to_string(), serde_json::Value::Array(rows));
            }
            if let Some((min, max)) = panel.price().bounds() {
                value.insert("price".to_string(), serde_json::json!({ "min": min, "max": max }));
            }
            return json_pretty(&value, "{}");
        }

        let markdown = self.format == OutputFormat::Markdown;
        let mut lines = Vec::new();
        for kind in FacetKind::all() {
            let rows = panel.list(kind).rows(filters);
            if rows.is_empty() {
                continue;
            }
            if markdown {
                lines.push(format!("### {}", kind.label(self.messages)));
            } else {
                lines.push(format!("{}:", kind.label(self.messages)));
            }
            for row in rows {
                let mark = if row.checked { "[x]" } else { "[ ]" };
                let prefix = if markdown { "- " } else { "  " };
                lines.push(format!("{}{} {} ({})", prefix, mark, row.key, row.count));
            }
            lines.push(String::new());
        }

        if let Some((min, max)) = panel.price().bounds() {
            let (lo, hi) = panel.price().input_values();
            lines.push(format!(
                "{}: {} - {} [{} - {}]",
                self.messages.price,
                price::format_eur(min),
                price::format_eur(max),
                lo,
                hi
            ));
        }

        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }

    // JSON formatting

    fn json_results(&self, view: &ResultsView) -> String {
        let output = ResultsOutput {
            error: view.error.as_deref(),
            stats: view.stats,
            elapsed_ms: view.elapsed_ms,
            products: self.cards(view.products()),
            categories: &view.categories,
            active_filters: view.active_filters.iter().map(|c| c.label.as_str()).collect(),
            pagination: view.pagination(),
        };
        json_pretty(&output, "{}")
    }

    // Table formatting

    fn header_lines(&self, view: &ResultsView) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(error) = &view.error {
            lines.push(format!("! {}", error));
        } else if let Some(stats) = view.stats_line(self.messages) {
            lines.push(stats);
        }

        if !view.active_filters.is_empty() {
            let chips: Vec<&str> = view.active_filters.iter().map(|c| c.label.as_str()).collect();
            lines.push(format!("{}: {}", self.messages.active_filters, chips.join(" | ")));
        }

        if !view.categories.is_empty() {
            let cats: Vec<String> = view
                .categories
                .iter()
                .map(|c| format!("{} ({} {})", c.name, c.count, self.messages.products))
                .collect();
            lines.push(format!("{}: {}", self.messages.categories, cats.join(", ")));
        }

        lines
    }

    fn table_results(&self, view: &ResultsView) -> String {
        let mut lines = self.header_lines(view);

        if view.is_no_results() {
            lines.push(String::new());
            lines.push(self.messages.no_results.to_string());
            lines.push(self.messages.no_results_hint.to_string());
            return lines.join("\n");
        }

        let cards = self.cards(view.products());
        if !cards.is_empty() {
            let id_width = 8;
            let price_width = 22;
            let avail_width = 14;
            let title_width = 50;

            lines.push(String::new());
            lines.push(format!(
                "{:<id_width$}  {:<price_width$}  {:<avail_width$}  {}",
                self.messages.id,
                self.messages.price,
                self.messages.availability,
                self.messages.title
            ));
            lines.push(format!(
                "{:-<id_width$}  {:-<price_width$}  {:-<avail_width$}  {:-<title_width$}",
                "", "", "", ""
            ));

            for card in &cards {
                let id = card.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
                let price = match &card.discount {
                    Some(badge) => format!("{} {}", card.price, badge),
                    None => card.price.clone(),
                };
                lines.push(format!(
                    "{:<id_width$}  {:<price_width$}  {:<avail_width$}  {}",
                    id,
                    price,
                    card.availability,
                    truncate(&card.title, title_width)
                ));
            }
        }

        if let Some(pagination) = view.pagination() {
            lines.push(String::new());
            lines.push(pagination.render());
        }

        lines.join("\n")
    }

    fn table_product(&self, product: &Product) -> String {
        let mut lines = vec![format!("{:<14} {}", format!("{}:", self.messages.title), product.title)];

        if let Some(id) = product.detail_id() {
            lines.push(format!("{:<14} {}", format!("{}:", self.messages.id), id));
        }
        for (label, value) in card::detail_fields(product, self.messages) {
            lines.push(format!("{:<14} {}", format!("{}:", label), value));
        }
        if let Some(description) = product.description.as_deref().filter(|d| !d.trim().is_empty()) {
            lines.push(String::new());
            lines.push(description.trim().to_string());
        }
        if let Some(url) = product.product_url.as_deref().filter(|u| !u.is_empty()) {
            lines.push(String::new());
            lines.push(format!("{}: {}", self.messages.view_in_store, url));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_results(&self, view: &ResultsView) -> String {
        let mut lines: Vec<String> =
            self.header_lines(view).into_iter().map(|l| format!("*{}*", l)).collect();

        if view.is_no_results() {
            lines.push(String::new());
            lines.push(format!("**{}**", self.messages.no_results));
            lines.push(self.messages.no_results_hint.to_string());
            return lines.join("\n");
        }

        let cards = self.cards(view.products());
        if !cards.is_empty() {
            lines.push(String::new());
            lines.push(format!(
                "| {} | {} | {} | {} |",
                self.messages.id, self.messages.price, self.messages.availability, self.messages.title
            ));
            lines.push("|----|-------|--------------|-------|".to_string());

            for card in &cards {
                let id = card.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
                lines.push(format!(
                    "| {} | {} | {} | {} |",
                    id,
                    card.price_line(("~~", "~~")),
                    card.availability,
                    truncate(&card.title, 40)
                ));
            }
        }

        if let Some(pagination) = view.pagination() {
            lines.push(String::new());
            lines.push(format!("`{}`", pagination.render()));
        }

        lines.join("\n")
    }

    fn markdown_product(&self, product: &Product) -> String {
        let mut lines = vec![format!("## {}", product.title), String::new()];

        for (label, value) in card::detail_fields(product, self.messages) {
            lines.push(format!("- **{}:** {}", label, value));
        }
        if let Some(url) = product.product_url.as_deref().filter(|u| !u.is_empty()) {
            lines.push(format!("- [{}]({})", self.messages.view_in_store, url));
        }
        if let Some(description) = product.description.as_deref().filter(|d| !d.trim().is_empty()) {
            lines.push(String::new());
            lines.push(description.trim().to_string());
        }

        lines.join("\n")
    }
}

fn json_pretty<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string())
}

/// Shortens `text` to `width` characters, ending in `...` when cut.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
