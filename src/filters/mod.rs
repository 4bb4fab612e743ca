//! Typed filter set, filter changes, and active-filter chips.

pub mod facet;
pub mod price;

use crate::api::QueryParams;
use crate::i18n::Messages;
use serde::{Deserialize, Serialize};

pub use facet::{FacetList, FacetPanel, FacetRow};
pub use price::{Handle, PriceRange, PriceSlider};

/// A multi-value facet dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
    Brand,
    Category,
    Shop,
}

impl FacetKind {
    pub fn all() -> [FacetKind; 3] {
        [FacetKind::Brand, FacetKind::Category, FacetKind::Shop]
    }

    /// Query parameter name; always the plural, list-valued form.
    pub fn param(self) -> &'static str {
        match self {
            FacetKind::Brand => "brands",
            FacetKind::Category => "categories",
            FacetKind::Shop => "shops",
        }
    }

    pub fn label(self, messages: &Messages) -> &'static str {
        match self {
            FacetKind::Brand => messages.brand,
            FacetKind::Category => messages.category,
            FacetKind::Shop => messages.shop,
        }
    }
}

/// One mutation of the filter set.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    /// Checkbox toggled on or off.
    Facet { kind: FacetKind, value: String, selected: bool },
    AvailableOnly(bool),
    InStock(bool),
    /// Committed price range; an empty range removes the price filter.
    Price(PriceRange),
}

impl FilterChange {
    pub fn select(kind: FacetKind, value: impl Into<String>) -> Self {
        FilterChange::Facet { kind, value: value.into(), selected: true }
    }

    pub fn deselect(kind: FacetKind, value: impl Into<String>) -> Self {
        FilterChange::Facet { kind, value: value.into(), selected: false }
    }
}

/// The active filters. A list that is empty is an absent filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    brands: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    shops: Vec<String>,
    #[serde(default)]
    available_only: bool,
    #[serde(default)]
    in_stock: bool,
    #[serde(default)]
    price: PriceRange,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self, kind: FacetKind) -> &[String] {
        match kind {
            FacetKind::Brand => &self.brands,
            FacetKind::Category => &self.categories,
            FacetKind::Shop => &self.shops,
        }
    }

    fn values_mut(&mut self, kind: FacetKind) -> &mut Vec<String> {
        match kind {
            FacetKind::Brand => &mut self.brands,
            FacetKind::Category => &mut self.categories,
            FacetKind::Shop => &mut self.shops,
        }
    }

    pub fn is_selected(&self, kind: FacetKind, value: &str) -> bool {
        self.values(kind).iter().any(|v| v == value)
    }

    pub fn available_only(&self) -> bool {
        self.available_only
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    pub fn price(&self) -> PriceRange {
        self.price
    }

    /// Applies one change. Blank facet values are ignored.
    pub fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::Facet { kind, value, selected } => {
                let value = value.trim();
                if value.is_empty() {
                    return;
                }
                let values = self.values_mut(kind);
                if selected {
                    if !values.iter().any(|v| v == value) {
                        values.push(value.to_string());
                    }
                } else {
                    values.retain(|v| v != value);
                }
            }
            FilterChange::AvailableOnly(on) => self.available_only = on,
            FilterChange::InStock(on) => self.in_stock = on,
            FilterChange::Price(range) => self.price = range,
        }
    }

    /// Builder-style [`apply`](Self::apply).
    pub fn with(mut self, change: FilterChange) -> Self {
        self.apply(change);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
            && self.categories.is_empty()
            && self.shops.is_empty()
            && !self.available_only
            && !self.in_stock
            && self.price.is_empty()
    }

    /// Number of distinct parameters this set contributes to a request.
    pub fn param_count(&self) -> usize {
        let mut params = QueryParams::new();
        self.write_params(&mut params);
        params.len()
    }

    /// Writes every non-empty filter as exactly one query parameter.
    pub fn write_params(&self, params: &mut QueryParams) {
        for kind in FacetKind::all() {
            let values = self.values(kind);
            if !values.is_empty() {
                params.set(kind.param(), values.join(","));
            }
        }
        if self.available_only {
            params.set("availability", "true");
        }
        if self.in_stock {
            params.set("stock", "true");
        }
        params.set_opt("min_price", self.price.min.map(price::format_bound));
        params.set_opt("max_price", self.price.max.map(price::format_bound));
    }

    /// Removable chips describing the active filters.
    pub fn active_filters(&self, messages: &Messages) -> Vec<ActiveFilter> {
        let mut chips = Vec::new();

        for kind in FacetKind::all() {
            for value in self.values(kind) {
                chips.push(ActiveFilter {
                    label: format!("{}: {}", kind.label(messages), value),
                    kind: ActiveFilterKind::Facet(kind, value.clone()),
                });
            }
        }

        if self.available_only {
            chips.push(ActiveFilter {
                label: messages.available_only.to_string(),
                kind: ActiveFilterKind::AvailableOnly,
            });
        }

        if self.in_stock {
            chips.push(ActiveFilter {
                label: messages.in_stock.to_string(),
                kind: ActiveFilterKind::InStock,
            });
        }

        if !self.price.is_empty() {
            chips.push(ActiveFilter {
                label: format!("{}: {}", messages.price, self.price.label()),
                kind: ActiveFilterKind::Price,
            });
        }

        chips
    }
}

/// What an active-filter chip refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ActiveFilterKind {
    Facet(FacetKind, String),
    AvailableOnly,
    InStock,
    Price,
}

/// A removable chip shown above the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilter {
    pub kind: ActiveFilterKind,
    pub label: String,
}

impl ActiveFilter {
    /// The change that removes this chip's filter.
    pub fn removal(&self) -> FilterChange {
        match &self.kind {
            ActiveFilterKind::Facet(kind, value) => FilterChange::deselect(*kind, value.clone()),
            ActiveFilterKind::AvailableOnly => FilterChange::AvailableOnly(false),
            ActiveFilterKind::InStock => FilterChange::InStock(false),
            ActiveFilterKind::Price => FilterChange::Price(PriceRange::default()),
        }
    }
}
