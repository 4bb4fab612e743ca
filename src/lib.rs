//! shop-search - Headless client for a faceted product search service
//!
//! Models the search page of an online catalogue: query state, debounced
//! suggestions, facet filters with a price slider, paginated results and a
//! product detail view, with last-request-wins sequencing throughout.

pub mod api;
pub mod commands;
pub mod config;
pub mod filters;
pub mod format;
pub mod i18n;
pub mod input;
pub mod modal;
pub mod search;
pub mod suggest;

#[cfg(test)]
mod test_support;

pub use api::{ApiClient, ApiError, Product, ProductId, SearchBackend};
pub use config::Config;
pub use i18n::Language;
pub use search::{SearchController, SearchOutcome};
