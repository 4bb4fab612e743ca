//! Debounced type-ahead suggestions.

pub mod debounce;
pub mod dropdown;

pub use debounce::Debouncer;
pub use dropdown::{SuggestionAction, SuggestionDropdown, SuggestionItem};

use crate::api::{CategoryHit, SearchBackend};
use crate::config::Config;
use crate::search::lock;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Fetches suggestions as the user types and keeps the dropdown.
pub struct SuggestionController<B: SearchBackend + 'static> {
    backend: Arc<B>,
    dropdown: Arc<Mutex<SuggestionDropdown>>,
    debouncer: Debouncer,
    min_chars: usize,
    suggestion_limit: usize,
    category_limit: usize,
}

impl<B: SearchBackend + 'static> SuggestionController<B> {
    pub fn new(backend: Arc<B>, config: &Config) -> Self {
        Self {
            backend,
            dropdown: Arc::new(Mutex::new(SuggestionDropdown::new())),
            debouncer: Debouncer::new(config.debounce()),
            min_chars: config.min_suggest_chars,
            suggestion_limit: config.suggestion_limit,
            category_limit: config.category_limit,
        }
    }

    /// Handles one keystroke. Short input hides the dropdown at once; anything
    /// else is fetched after the debounce delay, replacing any pending fetch.
    pub fn on_input(&self, text: &str) {
        let query = text.trim();
        if query.chars().count() < self.min_chars {
            self.debouncer.cancel();
            lock(&self.dropdown).clear();
            return;
        }

        let backend = Arc::clone(&self.backend);
        let dropdown = Arc::clone(&self.dropdown);
        let query = query.to_string();
        let (suggestion_limit, category_limit) = (self.suggestion_limit, self.category_limit);

        self.debouncer.schedule(async move {
            let (suggestions, categories) =
                fetch(backend.as_ref(), &query, suggestion_limit, category_limit).await;
            lock(&dropdown).replace(&query, suggestions, categories);
        });
    }

    /// Fetches immediately, bypassing the debounce.
    pub async fn fetch_now(&self, text: &str) -> SuggestionDropdown {
        self.debouncer.cancel();
        let query = text.trim();
        if query.chars().count() < self.min_chars {
            lock(&self.dropdown).clear();
        } else {
            let (suggestions, categories) =
                fetch(self.backend.as_ref(), query, self.suggestion_limit, self.category_limit)
                    .await;
            lock(&self.dropdown).replace(query, suggestions, categories);
        }
        self.dropdown()
    }

    pub fn dropdown(&self) -> SuggestionDropdown {
        lock(&self.dropdown).clone()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn on_focus(&self) {
        lock(&self.dropdown).on_focus();
    }

    pub fn on_outside_click(&self) {
        lock(&self.dropdown).on_outside_click();
    }

    pub fn on_escape(&self) {
        lock(&self.dropdown).on_escape();
    }

    pub fn hide(&self) {
        self.debouncer.cancel();
        lock(&self.dropdown).hide();
    }

    pub fn select(&self, index: usize) -> Option<SuggestionAction> {
        lock(&self.dropdown).select(index)
    }
}

/// Requests both lists concurrently. Either failing yields an empty list.
async fn fetch<B: SearchBackend + ?Sized>(
    backend: &B,
    query: &str,
    suggestion_limit: usize,
    category_limit: usize,
) -> (Vec<String>, Vec<CategoryHit>) {
    debug!("Fetching suggestions for: {}", query);

    let (suggestions, categories) = tokio::join!(
        backend.suggestions(query, suggestion_limit),
        backend.search_categories(query, category_limit)
    );

    let suggestions = suggestions.unwrap_or_else(|e| {
        debug!("Suggestions failed: {}", e);
        Vec::new()
    });
    let categories = categories.unwrap_or_else(|e| {
        debug!("Category suggestions failed: {}", e);
        Vec::new()
    });
    (suggestions, categories)
}
