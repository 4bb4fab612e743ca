//! Facet checkbox lists with local search, and the facet sidebar panel.

use super::price::PriceSlider;
use super::{FacetKind, FilterSet};
use crate::api::{FacetEntry, Facets};
use tracing::debug;

/// A rendered checkbox row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetRow {
    pub key: String,
    pub count: u64,
    pub checked: bool,
}

/// One facet's entries plus the text typed in its local search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetList {
    kind: FacetKind,
    entries: Vec<FacetEntry>,
    /// Lowercased search text
    search: String,
}

impl FacetList {
    pub fn new(kind: FacetKind) -> Self {
        Self { kind, entries: Vec::new(), search: String::new() }
    }

    pub fn kind(&self) -> FacetKind {
        self.kind
    }

    pub fn entries(&self) -> &[FacetEntry] {
        &self.entries
    }

    pub fn set_entries(&mut self, entries: Vec<FacetEntry>) {
        self.entries = entries.into_iter().filter(|e| !e.key.trim().is_empty()).collect();
    }

    /// Updates the local search box. Only affects which rows are shown.
    pub fn set_search(&mut self, text: &str) {
        self.search = text.trim().to_lowercase();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    fn matches(&self, entry: &FacetEntry) -> bool {
        self.search.is_empty() || entry.key.to_lowercase().contains(&self.search)
    }

    /// Rows that pass the local search, with checkbox state from `filters`.
    pub fn rows(&self, filters: &FilterSet) -> Vec<FacetRow> {
        self.entries
            .iter()
            .filter(|e| self.matches(e))
            .map(|e| FacetRow {
                key: e.key.clone(),
                count: e.count,
                checked: filters.is_selected(self.kind, &e.key),
            })
            .collect()
    }

    /// Number of rows hidden by the local search.
    pub fn hidden_count(&self) -> usize {
        self.entries.iter().filter(|e| !self.matches(e)).count()
    }
}

/// The filter sidebar: three checkbox lists and the price slider.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetPanel {
    brands: FacetList,
    categories: FacetList,
    shops: FacetList,
    price: PriceSlider,
}

impl Default for FacetPanel {
    fn default() -> Self {
        Self {
            brands: FacetList::new(FacetKind::Brand),
            categories: FacetList::new(FacetKind::Category),
            shops: FacetList::new(FacetKind::Shop),
            price: PriceSlider::new(),
        }
    }
}

impl FacetPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, kind: FacetKind) -> &FacetList {
        match kind {
            FacetKind::Brand => &self.brands,
            FacetKind::Category => &self.categories,
            FacetKind::Shop => &self.shops,
        }
    }

    pub fn list_mut(&mut self, kind: FacetKind) -> &mut FacetList {
        match kind {
            FacetKind::Brand => &mut self.brands,
            FacetKind::Category => &mut self.categories,
            FacetKind::Shop => &mut self.shops,
        }
    }

    pub fn price(&self) -> &PriceSlider {
        &self.price
    }

    pub fn price_mut(&mut self) -> &mut PriceSlider {
        &mut self.price
    }

    /// Applies a facet payload. Only the parts the payload actually carries
    /// are replaced, so `{}` leaves the panel as it was. Returns whether
    /// anything changed.
    pub fn apply(&mut self, facets: &Facets, filters: &FilterSet) -> bool {
        let mut changed = false;

        for (kind, entries) in [
            (FacetKind::Brand, &facets.brands),
            (FacetKind::Category, &facets.categories),
            (FacetKind::Shop, &facets.shops),
        ] {
            if !entries.is_empty() {
                self.list_mut(kind).set_entries(entries.clone());
                changed = true;
            }
        }

        if let Some(stats) = &facets.price_stats {
            changed |= self.price.set_bounds(stats, filters.price());
        }

        debug!("Applied facet payload (changed: {})", changed);
        changed
    }

    /// Resets control state after "clear filters": the slider goes back to
    /// the last-loaded bounds and the local search boxes are emptied.
    pub fn reset_controls(&mut self) {
        self.price.reset();
        for kind in FacetKind::all() {
            self.list_mut(kind).set_search("");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PriceStats;
    use crate::filters::FilterChange;

    fn make_facets() -> Facets {
        Facets {
            brands: vec![
                FacetEntry::new("Samsung", 40),
                FacetEntry::new("Sony", 12),
                FacetEntry::new("LG", 9),
            ],
            categories: vec![FacetEntry::new("Televisions", 61)],
            shops: vec![FacetEntry::new("Public", 30), FacetEntry::new("Kotsovolos", 31)],
            price_stats: Some(PriceStats::new(99.0, 2499.0)),
        }
    }

    #[test]
    fn test_local_search_is_case_insensitive() {
        let mut list = FacetList::new(FacetKind::Brand);
        list.set_entries(make_facets().brands);

        list.set_search("S");
        let keys: Vec<String> = list.rows(&FilterSet::new()).into_iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["Samsung", "Sony"]);
        assert_eq!(list.hidden_count(), 1);

        list.set_search("  ");
        assert_eq!(list.rows(&FilterSet::new()).len(), 3);
    }

    #[test]
    fn test_rows_reflect_selection() {
        let mut list = FacetList::new(FacetKind::Shop);
        list.set_entries(make_facets().shops);

        let filters = FilterSet::new().with(FilterChange::select(FacetKind::Shop, "Kotsovolos"));
        let rows = list.rows(&filters);
        assert!(!rows[0].checked);
        assert!(rows[1].checked);
        assert_eq!(rows[1].count, 31);
    }

    #[test]
    fn test_local_search_keeps_selection() {
        let mut list = FacetList::new(FacetKind::Brand);
        list.set_entries(make_facets().brands);
        let filters = FilterSet::new().with(FilterChange::select(FacetKind::Brand, "LG"));

        list.set_search("sam");
        assert!(filters.is_selected(FacetKind::Brand, "LG"));
        assert_eq!(list.rows(&filters).len(), 1);
    }

    #[test]
    fn test_blank_entries_dropped() {
        let mut list = FacetList::new(FacetKind::Category);
        list.set_entries(vec![FacetEntry::new("", 3), FacetEntry::new("Audio", 2)]);
        assert_eq!(list.entries().len(), 1);
    }

    #[test]
    fn test_apply_full_payload() {
        let mut panel = FacetPanel::new();
        assert!(panel.apply(&make_facets(), &FilterSet::new()));
        assert_eq!(panel.list(FacetKind::Brand).entries().len(), 3);
        assert_eq!(panel.list(FacetKind::Shop).entries().len(), 2);
        assert_eq!(panel.price().bounds(), Some((99.0, 2499.0)));
    }

    #[test]
    fn test_empty_payload_leaves_panel_untouched() {
        let mut panel = FacetPanel::new();
        panel.apply(&make_facets(), &FilterSet::new());
        panel.list_mut(FacetKind::Brand).set_search("so");
        let before = panel.clone();

        let empty: Facets = serde_json::from_str("{}").unwrap();
        assert!(!panel.apply(&empty, &FilterSet::new()));
        assert_eq!(panel, before);
    }

    #[test]
    fn test_partial_payload_replaces_only_present_lists() {
        let mut panel = FacetPanel::new();
        panel.apply(&make_facets(), &FilterSet::new());

        let partial = Facets { brands: vec![FacetEntry::new("Philips", 5)], ..Facets::default() };
        panel.apply(&partial, &FilterSet::new());
        assert_eq!(panel.list(FacetKind::Brand).entries(), [FacetEntry::new("Philips", 5)]);
        assert_eq!(panel.list(FacetKind::Shop).entries().len(), 2);
        assert_eq!(panel.price().bounds(), Some((99.0, 2499.0)));
    }

    #[test]
    fn test_reset_controls() {
        let mut panel = FacetPanel::new();
        panel.apply(&make_facets(), &FilterSet::new());
        panel.price_mut().input(crate::filters::Handle::Lower, 500.0);
        panel.list_mut(FacetKind::Shop).set_search("pub");

        panel.reset_controls();
        assert_eq!(panel.price().handles(), (99.0, 2499.0));
        assert_eq!(panel.list(FacetKind::Shop).search(), "");
    }
}
