//! Payload models for the search service.
//!
//! The service is loose about field names and value shapes, so most types
//! here accept more than one spelling and normalise on the way in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product identifier. Numeric in practice, but string ids are tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for ProductId {
    fn from(n: u64) -> Self {
        ProductId::Number(n)
    }
}

impl FromStr for ProductId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse::<u64>().map(ProductId::Number).unwrap_or_else(|_| ProductId::Text(s.to_string())))
    }
}

/// A brand, category or shop reference: either `"Acme"` or `{"name": "Acme"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Named {
    Plain(String),
    Object { name: String },
}

impl Named {
    pub fn name(&self) -> &str {
        match self {
            Named::Plain(name) => name,
            Named::Object { name } => name,
        }
    }
}

/// A price as sent by the service: a number, or an already formatted string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Amount(f64),
    Formatted(String),
}

impl PriceValue {
    /// Numeric value, parsing formatted strings such as `"12,50 €"`.
    pub fn amount(&self) -> Option<f64> {
        match self {
            PriceValue::Amount(v) if v.is_finite() => Some(*v),
            PriceValue::Amount(_) => None,
            PriceValue::Formatted(text) => parse_price_text(text),
        }
    }
}

/// Parses a human formatted price. When both `.` and `,` occur, the one that
/// comes last is the decimal separator.
fn parse_price_text(text: &str) -> Option<f64> {
    let digits: String =
        text.chars().filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-')).collect();

    let normalized = match (digits.rfind('.'), digits.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => digits.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => digits.replace(',', ""),
        (None, Some(_)) => digits.replace(',', "."),
        _ => digits,
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A single product, or an aggregated product offered by several shops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<PriceValue>,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub availability: Option<bool>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub brand: Option<Named>,
    #[serde(default)]
    pub category: Option<Named>,
    #[serde(default)]
    pub shop: Option<Named>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ean: Option<String>,
    #[serde(default)]
    pub mpn: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,

    // Aggregated product fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_available_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_shops: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_ids: Vec<ProductId>,
}

impl Product {
    /// True for records that carry a best price across shops.
    pub fn is_aggregated(&self) -> bool {
        self.best_available_price.is_some()
    }

    pub fn is_available(&self) -> bool {
        self.availability.unwrap_or(false)
    }

    /// The price a shopper pays: best price for aggregated records.
    pub fn effective_price(&self) -> Option<f64> {
        if self.is_aggregated() {
            self.best_available_price
        } else {
            self.price.as_ref().and_then(PriceValue::amount)
        }
    }

    /// Rounded percent off when the original price exceeds the current one.
    pub fn discount_percent(&self) -> Option<u32> {
        if self.is_aggregated() {
            return None;
        }
        let price = self.effective_price()?;
        let original = self.original_price?;
        if original > price && original > 0.0 {
            Some(((original - price) / original * 100.0).round() as u32)
        } else {
            None
        }
    }

    /// The id to request details for: own id, else the first aggregated id.
    pub fn detail_id(&self) -> Option<&ProductId> {
        self.id.as_ref().or_else(|| self.product_ids.first())
    }

    /// True when `id` refers to this record or one of its aggregated offers.
    pub fn has_id(&self, id: &ProductId) -> bool {
        self.id.as_ref() == Some(id) || self.product_ids.contains(id)
    }

    pub fn brand_name(&self) -> Option<&str> {
        self.brand.as_ref().map(Named::name)
    }

    pub fn shop_name(&self) -> Option<&str> {
        self.shop.as_ref().map(Named::name)
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(Named::name)
    }
}

fn first_page() -> u32 {
    1
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facets: Option<Facets>,
}

impl Default for ResultsPage {
    fn default() -> Self {
        Self { products: Vec::new(), total: 0, page: 1, per_page: None, total_pages: 0, facets: None }
    }
}

#[derive(Deserialize)]
struct UnifiedPayload {
    #[serde(rename = "type")]
    _kind: String,
    products: ResultsPage,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SearchPayload {
    Unified(UnifiedPayload),
    Page(ResultsPage),
}

impl ResultsPage {
    /// Parses a `/search` body in either the plain or the unified shape.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        match serde_json::from_str::<SearchPayload>(body)? {
            SearchPayload::Page(page) => Ok(page),
            SearchPayload::Unified(unified) => {
                let mut page = unified.products;
                page.products.retain(|p| !p.title.is_empty());
                if page.total == 0 {
                    page.total = page.products.len() as u64;
                }
                Ok(page)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Finds a product on this page by its id or one of its aggregated ids.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.has_id(id))
    }
}

/// A `{key, count}` facet bucket, also accepting `name` and `doc_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FacetEntryRepr")]
pub struct FacetEntry {
    pub key: String,
    pub count: u64,
}

impl FacetEntry {
    pub fn new(key: impl Into<String>, count: u64) -> Self {
        Self { key: key.into(), count }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FacetEntryRepr {
    Bare(String),
    Fields {
        #[serde(default)]
        key: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        doc_count: Option<u64>,
        #[serde(default)]
        count: Option<u64>,
    },
}

impl From<FacetEntryRepr> for FacetEntry {
    fn from(repr: FacetEntryRepr) -> Self {
        match repr {
            FacetEntryRepr::Bare(key) => FacetEntry { key, count: 0 },
            FacetEntryRepr::Fields { key, name, doc_count, count } => FacetEntry {
                key: key.or(name).unwrap_or_default(),
                count: doc_count.or(count).unwrap_or(0),
            },
        }
    }
}

/// Price bounds across the catalogue or the current result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl PriceStats {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    /// Whole-euro slider bounds: `floor(min)` and `ceil(max)`.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let min = self.min?.floor();
        let max = self.max.unwrap_or(min).ceil();
        Some((min, max.max(min)))
    }
}

/// Facet payload from `/facets` or embedded in a results page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facets {
    #[serde(default)]
    pub brands: Vec<FacetEntry>,
    #[serde(default)]
    pub categories: Vec<FacetEntry>,
    #[serde(default)]
    pub shops: Vec<FacetEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_stats: Option<PriceStats>,
}

impl Facets {
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
            && self.categories.is_empty()
            && self.shops.is_empty()
            && self.price_stats.and_then(|s| s.bounds()).is_none()
    }
}

/// A category match from `/categories/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CategoryHitRepr")]
pub struct CategoryHit {
    pub name: String,
    pub count: u64,
}

impl CategoryHit {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self { name: name.into(), count }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryHitRepr {
    Bare(String),
    Fields {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        key: Option<String>,
        #[serde(default)]
        total_products: Option<u64>,
        #[serde(default)]
        unique_products: Option<u64>,
        #[serde(default)]
        count: Option<u64>,
    },
}

impl From<CategoryHitRepr> for CategoryHit {
    fn from(repr: CategoryHitRepr) -> Self {
        match repr {
            CategoryHitRepr::Bare(name) => CategoryHit { name, count: 0 },
            CategoryHitRepr::Fields { name, key, total_products, unique_products, count } => {
                CategoryHit {
                    name: name.or(key).unwrap_or_default(),
                    count: total_products.or(unique_products).or(count).unwrap_or(0),
                }
            }
        }
    }
}

/// Response of `/image-search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSearchResult {
    #[serde(default)]
    pub search_query: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ImageSearchResult {
    /// Text to search for: detected query, else description, else a generic term.
    pub fn query(&self) -> String {
        [&self.search_query, &self.description]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("image search")
            .to_string()
    }
}
