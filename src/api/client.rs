//! HTTP client for the product search service.

use super::error::{ApiError, ApiResult};
use super::models::{CategoryHit, Facets, ImageSearchResult, Product, ProductId, ResultsPage};
use super::params::QueryParams;
use crate::config::Config;
use crate::input::ImageUpload;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::multipart::{Form, Part};
use wreq::Client;

/// Everything the controllers need from the search service - enables mocking for tests.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// `GET /search` with fully built parameters.
    async fn search(&self, params: &QueryParams) -> ApiResult<ResultsPage>;

    /// `GET /suggestions`: free-text completions.
    async fn suggestions(&self, query: &str, limit: usize) -> ApiResult<Vec<String>>;

    /// `GET /categories/search`: categories matching the text.
    async fn search_categories(&self, query: &str, limit: usize) -> ApiResult<Vec<CategoryHit>>;

    /// `GET /facets`: catalogue-wide facet buckets and price bounds.
    async fn facets(&self) -> ApiResult<Facets>;

    /// `GET /product/{id}`.
    async fn product(&self, id: &ProductId) -> ApiResult<Product>;

    /// `POST /image-search` with the image as multipart field `image`.
    async fn image_search(&self, upload: ImageUpload) -> ApiResult<ImageSearchResult>;
}

/// JSON-over-HTTP implementation of [`SearchBackend`].
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the service configured in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, params: Option<&QueryParams>) -> String {
        match params {
            Some(params) if !params.is_empty() => format!("{}{}?{}", self.base_url, path, params),
            _ => format!("{}{}", self.base_url, path),
        }
    }

    /// Performs a GET and returns the body of a successful response.
    async fn get(&self, endpoint: &str, url: &str) -> ApiResult<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::transport(endpoint, e))?;

        Self::read_body(endpoint, response).await
    }

    async fn read_body(endpoint: &str, response: wreq::Response) -> ApiResult<String> {
        let status = response.status();
        debug!("{} response status: {}", endpoint, status);

        if !status.is_success() {
            warn!("{} failed with status {}", endpoint, status);
            return Err(ApiError::Status { endpoint: endpoint.to_string(), status: status.as_u16() });
        }

        let body = response.text().await.map_err(|e| ApiError::transport(endpoint, e))?;
        if body.trim().is_empty() {
            return Err(ApiError::decode(endpoint, "empty response body"));
        }
        Ok(body)
    }

    fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> ApiResult<T> {
        serde_json::from_str(body).map_err(|e| ApiError::decode(endpoint, e))
    }
}

#[async_trait]
impl SearchBackend for ApiClient {
    async fn search(&self, params: &QueryParams) -> ApiResult<ResultsPage> {
        let url = self.url("/search", Some(params));

        info!("Searching: {}", params);
        let body = self.get("/search", &url).await?;
        ResultsPage::from_json(&body).map_err(|e| ApiError::decode("/search", e))
    }

    async fn suggestions(&self, query: &str, limit: usize) -> ApiResult<Vec<String>> {
        let mut params = QueryParams::new();
        params.set("q", query).set("limit", limit.to_string());
        let url = self.url("/suggestions", Some(&params));

        let body = self.get("/suggestions", &url).await?;
        Self::decode("/suggestions", &body)
    }

    async fn search_categories(&self, query: &str, limit: usize) -> ApiResult<Vec<CategoryHit>> {
        let mut params = QueryParams::new();
        params.set("q", query).set("limit", limit.to_string());
        let url = self.url("/categories/search", Some(&params));

        let body = self.get("/categories/search", &url).await?;
        Self::decode("/categories/search", &body)
    }

    async fn facets(&self) -> ApiResult<Facets> {
        let url = self.url("/facets", None);

        let body = self.get("/facets", &url).await?;
        Self::decode("/facets", &body)
    }

    async fn product(&self, id: &ProductId) -> ApiResult<Product> {
        let path = format!("/product/{}", urlencoding::encode(&id.to_string()));
        let url = self.url(&path, None);

        info!("Fetching product: {}", id);
        let body = self.get("/product", &url).await?;
        Self::decode("/product", &body)
    }

    async fn image_search(&self, upload: ImageUpload) -> ApiResult<ImageSearchResult> {
        let url = self.url("/image-search", None);
        info!("Uploading image {} ({} bytes)", upload.file_name, upload.bytes.len());

        let part = Part::bytes(upload.bytes).file_name(upload.file_name);
        let form = Form::new().part("image", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::transport("/image-search", e))?;

        let body = Self::read_body("/image-search", response).await?;
        Self::decode("/image-search", &body)
    }
}
