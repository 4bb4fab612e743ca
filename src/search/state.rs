//! Immutable query state and its single update function.

use crate::filters::{FacetKind, FilterChange, FilterSet};
use serde::{Deserialize, Serialize};

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    Availability,
    Newest,
}

impl SortKey {
    /// Value of the `sort` parameter; relevance is the service default and is not sent.
    pub fn param(self) -> Option<&'static str> {
        match self {
            SortKey::Relevance => None,
            SortKey::PriceAsc => Some("price_asc"),
            SortKey::PriceDesc => Some("price_desc"),
            SortKey::Availability => Some("availability"),
            SortKey::Newest => Some("newest"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "relevance" => Ok(SortKey::Relevance),
            "price_asc" => Ok(SortKey::PriceAsc),
            "price_desc" => Ok(SortKey::PriceDesc),
            "availability" => Ok(SortKey::Availability),
            "newest" => Ok(SortKey::Newest),
            _ => Err(format!(
                "Unknown sort: {}. Use: relevance, price_asc, price_desc, availability, newest",
                s
            )),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.param().unwrap_or("relevance"))
    }
}

/// Value of the `type` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    /// Products plus matching categories
    #[default]
    All,
    Products,
}

impl SearchType {
    pub fn param(self) -> &'static str {
        match self {
            SearchType::All => "all",
            SearchType::Products => "products",
        }
    }
}

/// Everything that shapes the next `/search` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchState {
    query: String,
    page: u32,
    per_page: u32,
    sort: SortKey,
    search_type: SearchType,
    filters: FilterSet,
}

/// A state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// New free text; trimmed, and restarts at page 1
    SetQuery(String),
    SetPage(u32),
    SetSort(SortKey),
    SetSearchType(SearchType),
    ChangeFilter(FilterChange),
    ClearFilters,
    /// Narrow to one category and ask for products only
    SelectCategory(String),
}

impl SearchState {
    pub fn new(per_page: u32) -> Self {
        Self {
            query: String::new(),
            page: 1,
            per_page: per_page.max(1),
            sort: SortKey::default(),
            search_type: SearchType::default(),
            filters: FilterSet::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Returns the state after `action`. `self` is left as it was.
    pub fn reduce(&self, action: Action) -> Self {
        let mut next = self.clone();
        match action {
            Action::SetQuery(query) => {
                next.query = query.trim().to_string();
                next.page = 1;
            }
            Action::SetPage(page) => next.page = page.max(1),
            Action::SetSort(sort) => {
                next.sort = sort;
                next.page = 1;
            }
            Action::SetSearchType(search_type) => {
                next.search_type = search_type;
                next.page = 1;
            }
            Action::ChangeFilter(change) => {
                next.filters.apply(change);
                next.page = 1;
            }
            Action::ClearFilters => {
                next.filters = FilterSet::new();
                next.page = 1;
            }
            Action::SelectCategory(name) => {
                next.filters.apply(FilterChange::select(FacetKind::Category, name));
                next.search_type = SearchType::Products;
                next.page = 1;
            }
        }
        next
    }
}
