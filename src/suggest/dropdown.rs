//! Suggestion dropdown model.

use crate::api::CategoryHit;
use serde::Serialize;

/// What selecting a suggestion does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "value", rename_all = "lowercase")]
pub enum SuggestionAction {
    /// Use the text as the query
    Query(String),
    /// Use the name as the query and filter by that category
    Category(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionItem {
    pub label: String,
    /// Product count for category items
    pub count: Option<u64>,
    pub action: SuggestionAction,
}

impl SuggestionItem {
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self { label: text.clone(), count: None, action: SuggestionAction::Query(text) }
    }

    pub fn category(hit: &CategoryHit) -> Self {
        Self {
            label: hit.name.clone(),
            count: Some(hit.count),
            action: SuggestionAction::Category(hit.name.clone()),
        }
    }
}

/// Merged text and category suggestions plus visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuggestionDropdown {
    /// Query the items were fetched for
    query: String,
    items: Vec<SuggestionItem>,
    visible: bool,
}

impl SuggestionDropdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn items(&self) -> &[SuggestionItem] {
        &self.items
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replaces the contents with fresh results. Text suggestions come first;
    /// blank entries are dropped. Shown only when something is left.
    pub fn replace(&mut self, query: &str, suggestions: Vec<String>, categories: Vec<CategoryHit>) {
        let texts = suggestions
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(SuggestionItem::text);
        let cats =
            categories.iter().filter(|c| !c.name.trim().is_empty()).map(SuggestionItem::category);

        self.query = query.to_string();
        self.items = texts.chain(cats).collect();
        self.visible = !self.items.is_empty();
    }

    /// Input focused: reopen if there is something to show.
    pub fn on_focus(&mut self) {
        self.visible = !self.items.is_empty();
    }

    pub fn on_outside_click(&mut self) {
        self.visible = false;
    }

    pub fn on_escape(&mut self) {
        self.visible = false;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Empties and hides; used when the input drops below the minimum length.
    pub fn clear(&mut self) {
        self.query.clear();
        self.items.clear();
        self.visible = false;
    }

    /// Picks the item at `index`, hiding the dropdown.
    pub fn select(&mut self, index: usize) -> Option<SuggestionAction> {
        let action = self.items.get(index)?.action.clone();
        self.visible = false;
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SuggestionDropdown {
        let mut dropdown = SuggestionDropdown::new();
        dropdown.replace(
            "cof",
            vec!["coffee".to_string(), " ".to_string(), "coffee beans".to_string()],
            vec![CategoryHit::new("Coffee Machines", 42)],
        );
        dropdown
    }

    #[test]
    fn test_replace_merges_lists() {
        let dropdown = filled();
        assert!(dropdown.is_visible());
        assert_eq!(dropdown.query(), "cof");
        let labels: Vec<&str> = dropdown.items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["coffee", "coffee beans", "Coffee Machines"]);
        assert_eq!(dropdown.items()[2].count, Some(42));
    }

    #[test]
    fn test_both_empty_hides() {
        let mut dropdown = filled();
        dropdown.replace("zzz", Vec::new(), Vec::new());
        assert!(!dropdown.is_visible());
        dropdown.on_focus();
        assert!(!dropdown.is_visible());
    }

    #[test]
    fn test_visibility_events() {
        let mut dropdown = filled();
        dropdown.on_escape();
        assert!(!dropdown.is_visible());
        dropdown.on_focus();
        assert!(dropdown.is_visible());
        dropdown.on_outside_click();
        assert!(!dropdown.is_visible());
    }

    #[test]
    fn test_select_actions() {
        let mut dropdown = filled();
        assert_eq!(dropdown.select(1), Some(SuggestionAction::Query("coffee beans".to_string())));
        assert!(!dropdown.is_visible());

        assert_eq!(
            dropdown.select(2),
            Some(SuggestionAction::Category("Coffee Machines".to_string()))
        );
        assert_eq!(dropdown.select(9), None);
    }

    #[test]
    fn test_clear() {
        let mut dropdown = filled();
        dropdown.clear();
        assert!(dropdown.is_empty());
        assert!(!dropdown.is_visible());
    }
}
