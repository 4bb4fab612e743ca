//! In-memory search backend for unit tests.

use crate::api::{
    ApiError, ApiResult, CategoryHit, Facets, ImageSearchResult, Product, ProductId, QueryParams,
    ResultsPage, SearchBackend,
};
use crate::input::ImageUpload;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Mock backend. Searches answer by the `q` parameter, falling back to `default_page`.
#[derive(Default)]
pub struct MockBackend {
    pub pages: HashMap<String, ResultsPage>,
    pub default_page: ResultsPage,
    pub fail_search: bool,
    /// Artificial latency per `q` value
    pub delays: HashMap<String, Duration>,
    /// Artificial latency of the category lookup per query
    pub category_delays: HashMap<String, Duration>,
    pub suggestions: Vec<String>,
    pub categories: Vec<CategoryHit>,
    pub fail_suggestions: bool,
    /// `None` makes `/facets` fail
    pub facets: Option<Facets>,
    /// Missing ids answer 404
    pub products: HashMap<ProductId, Product>,
    pub product_delay: Option<Duration>,
    pub image_query: Option<String>,

    pub search_calls: Mutex<Vec<QueryParams>>,
    pub suggestion_calls: Mutex<Vec<String>>,
    pub category_calls: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, query: &str, page: ResultsPage) -> Self {
        self.pages.insert(query.to_string(), page);
        self
    }

    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn with_category_delay(mut self, query: &str, delay: Duration) -> Self {
        self.category_delays.insert(query.to_string(), delay);
        self
    }

    pub fn with_product(mut self, product: Product) -> Self {
        if let Some(id) = product.id.clone() {
            self.products.insert(id, product);
        }
        self
    }

    pub fn search_calls(&self) -> Vec<QueryParams> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn suggestion_calls(&self) -> Vec<String> {
        self.suggestion_calls.lock().unwrap().clone()
    }

    pub fn category_calls(&self) -> Vec<String> {
        self.category_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for MockBackend {
    async fn search(&self, params: &QueryParams) -> ApiResult<ResultsPage> {
        self.search_calls.lock().unwrap().push(params.clone());
        let query = params.get("q").unwrap_or("").to_string();

        if let Some(delay) = self.delays.get(&query) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail_search {
            return Err(ApiError::Status { endpoint: "/search".to_string(), status: 500 });
        }
        Ok(self.pages.get(&query).cloned().unwrap_or_else(|| self.default_page.clone()))
    }

    async fn suggestions(&self, query: &str, _limit: usize) -> ApiResult<Vec<String>> {
        self.suggestion_calls.lock().unwrap().push(query.to_string());
        if self.fail_suggestions {
            return Err(ApiError::transport("/suggestions", "connection reset"));
        }
        Ok(self.suggestions.clone())
    }

    async fn search_categories(&self, query: &str, _limit: usize) -> ApiResult<Vec<CategoryHit>> {
        self.category_calls.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.category_delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail_suggestions {
            return Err(ApiError::transport("/categories/search", "connection reset"));
        }
        Ok(self.categories.clone())
    }

    async fn facets(&self) -> ApiResult<Facets> {
        self.facets
            .clone()
            .ok_or_else(|| ApiError::Status { endpoint: "/facets".to_string(), status: 503 })
    }

    async fn product(&self, id: &ProductId) -> ApiResult<Product> {
        if let Some(delay) = self.product_delay {
            tokio::time::sleep(delay).await;
        }
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::Status { endpoint: "/product".to_string(), status: 404 })
    }

    async fn image_search(&self, _upload: ImageUpload) -> ApiResult<ImageSearchResult> {
        match &self.image_query {
            Some(query) => {
                Ok(ImageSearchResult { search_query: Some(query.clone()), description: None })
            }
            None => Err(ApiError::Status { endpoint: "/image-search".to_string(), status: 500 }),
        }
    }
}

/// A page of simple products titled `"{prefix} 1"`, `"{prefix} 2"`, ...
pub fn make_page(prefix: &str, count: usize, total: u64, total_pages: u32) -> ResultsPage {
    ResultsPage {
        products: (0..count)
            .map(|i| Product {
                id: Some(ProductId::Number(i as u64 + 1)),
                title: format!("{} {}", prefix, i + 1),
                ..Default::default()
            })
            .collect(),
        total,
        page: 1,
        per_page: Some(24),
        total_pages,
        facets: None,
    }
}
