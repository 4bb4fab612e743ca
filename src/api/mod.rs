//! Search service access: HTTP client, wire models and errors.

pub mod client;
pub mod error;
pub mod models;
pub mod params;

pub use client::{ApiClient, SearchBackend};
pub use error::{ApiError, ApiResult};
pub use models::{
    CategoryHit, FacetEntry, Facets, ImageSearchResult, Named, PriceStats, PriceValue, Product,
    ProductId, ResultsPage,
};
pub use params::QueryParams;
