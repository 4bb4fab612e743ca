//! The search controller: owns query state and every view model.

use super::lock;
use super::query::build_params;
use super::sequence::RequestSequence;
use super::state::{Action, SearchState, SearchType, SortKey};
use super::view::ResultsView;
use crate::api::{ApiError, ProductId, SearchBackend};
use crate::config::Config;
use crate::filters::{ActiveFilter, FacetKind, FacetPanel, FilterChange, Handle};
use crate::i18n::Messages;
use crate::input::{ImageUpload, SpeechRecognizer};
use crate::modal::{DismissReason, ProductModal, Viewport};
use crate::suggest::{SuggestionAction, SuggestionController};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// What became of one `search` call.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Results rendered
    Applied,
    /// Error banner rendered
    Failed(ApiError),
    /// A later search was issued before this one completed; nothing rendered
    Superseded,
}

impl SearchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SearchOutcome::Applied)
    }
}

/// Drives searches against a [`SearchBackend`] and keeps the view models in sync.
///
/// All methods take `&self`; overlapping calls are allowed and resolved by
/// request token, so only the most recently issued search renders.
pub struct SearchController<B: SearchBackend + 'static> {
    backend: Arc<B>,
    messages: &'static Messages,
    category_limit: usize,
    sequence: RequestSequence,
    state: Mutex<SearchState>,
    view: Mutex<ResultsView>,
    facets: Mutex<FacetPanel>,
    modal: Mutex<ProductModal>,
    alert: Mutex<Option<String>>,
    suggestions: SuggestionController<B>,
}

impl<B: SearchBackend + 'static> SearchController<B> {
    pub fn new(backend: Arc<B>, config: &Config) -> Self {
        Self {
            suggestions: SuggestionController::new(Arc::clone(&backend), config),
            backend,
            messages: config.language.messages(),
            category_limit: config.category_limit,
            sequence: RequestSequence::new(),
            state: Mutex::new(SearchState::new(config.per_page)),
            view: Mutex::new(ResultsView::new()),
            facets: Mutex::new(FacetPanel::new()),
            modal: Mutex::new(ProductModal::new()),
            alert: Mutex::new(None),
        }
    }

    pub fn messages(&self) -> &'static Messages {
        self.messages
    }

    pub fn state(&self) -> SearchState {
        lock(&self.state).clone()
    }

    pub fn view(&self) -> ResultsView {
        lock(&self.view).clone()
    }

    pub fn facet_panel(&self) -> FacetPanel {
        lock(&self.facets).clone()
    }

    pub fn modal(&self) -> ProductModal {
        lock(&self.modal).clone()
    }

    pub fn suggestions(&self) -> &SuggestionController<B> {
        &self.suggestions
    }

    /// Takes the pending alert message (voice or image input failure).
    pub fn take_alert(&self) -> Option<String> {
        lock(&self.alert).take()
    }

    fn dispatch(&self, action: Action) -> SearchState {
        let mut state = lock(&self.state);
        *state = state.reduce(action);
        state.clone()
    }

    fn active_filters(&self, state: &SearchState) -> Vec<ActiveFilter> {
        state.filters().active_filters(self.messages)
    }

    /// Fetches `page` for the current state and renders it, unless a later
    /// search was issued in the meantime.
    pub async fn search(&self, page: u32) -> SearchOutcome {
        let state = self.dispatch(Action::SetPage(page));
        let params = build_params(&state);
        let token = self.sequence.issue();
        lock(&self.view).begin();

        debug!("Search #{} with {}", token.value(), params);
        let started = Instant::now();
        let result = self.backend.search(&params).await;

        if !self.sequence.is_current(token) {
            debug!("Discarding superseded search #{}", token.value());
            return SearchOutcome::Superseded;
        }

        let results = match result {
            Ok(results) => results,
            Err(e) => {
                warn!("Search failed: {}", e);
                lock(&self.view).fail(self.messages.search_error, self.active_filters(&state));
                return SearchOutcome::Failed(e);
            }
        };

        if let Some(facets) = &results.facets {
            lock(&self.facets).apply(facets, state.filters());
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!("Search #{}: {} results in {} ms", token.value(), results.total, elapsed_ms);
        lock(&self.view).succeed(results, Vec::new(), self.active_filters(&state), elapsed_ms);

        if !state.query().is_empty() {
            let categories = self
                .backend
                .search_categories(state.query(), self.category_limit)
                .await
                .unwrap_or_else(|e| {
                    debug!("Category lookup failed: {}", e);
                    Vec::new()
                });

            if self.sequence.is_current(token) {
                lock(&self.view).set_categories(categories);
            } else {
                debug!("Discarding categories of superseded search #{}", token.value());
            }
        }

        SearchOutcome::Applied
    }

    /// Applies several state changes, then issues one search for `page`.
    pub async fn run(&self, actions: Vec<Action>, page: u32) -> SearchOutcome {
        for action in actions {
            self.dispatch(action);
        }
        self.search(page).await
    }

    /// New free text; searches from page 1.
    pub async fn set_query(&self, text: &str) -> SearchOutcome {
        self.suggestions.hide();
        self.dispatch(Action::SetQuery(text.to_string()));
        self.search(1).await
    }

    pub async fn set_sort(&self, sort: SortKey) -> SearchOutcome {
        self.dispatch(Action::SetSort(sort));
        self.search(1).await
    }

    pub async fn set_search_type(&self, search_type: SearchType) -> SearchOutcome {
        self.dispatch(Action::SetSearchType(search_type));
        self.search(1).await
    }

    /// Applies one filter change and searches from page 1.
    pub async fn update_filter(&self, change: FilterChange) -> SearchOutcome {
        debug!("Filter change: {:?}", change);
        self.dispatch(Action::ChangeFilter(change));
        self.search(1).await
    }

    /// Checkbox toggled in a facet list.
    pub async fn toggle_facet(&self, kind: FacetKind, value: &str, selected: bool) -> SearchOutcome {
        let change = if selected {
            FilterChange::select(kind, value)
        } else {
            FilterChange::deselect(kind, value)
        };
        self.update_filter(change).await
    }

    /// The `×` on an active-filter chip.
    pub async fn remove_filter(&self, chip: &ActiveFilter) -> SearchOutcome {
        self.update_filter(chip.removal()).await
    }

    /// Empties the filter set, resets the controls to the loaded facet bounds,
    /// and searches from page 1.
    pub async fn clear_filters(&self) -> SearchOutcome {
        self.dispatch(Action::ClearFilters);
        lock(&self.facets).reset_controls();
        self.search(1).await
    }

    /// Category card or category suggestion picked.
    pub async fn select_category(&self, name: &str) -> SearchOutcome {
        self.dispatch(Action::SelectCategory(name.to_string()));
        self.search(1).await
    }

    /// Updates a facet list's local search box. No request is made.
    pub fn set_facet_search(&self, kind: FacetKind, text: &str) {
        lock(&self.facets).list_mut(kind).set_search(text);
    }

    /// Moves a price handle without committing.
    pub fn drag_price(&self, handle: Handle, value: f64) {
        lock(&self.facets).price_mut().drag(handle, value);
    }

    /// Releases the dragged handle, committing the price range.
    pub async fn release_price(&self) -> Option<SearchOutcome> {
        let change = lock(&self.facets).price_mut().release()?;
        Some(self.update_filter(change).await)
    }

    /// A numeric price input was edited; commits immediately.
    pub async fn input_price(&self, handle: Handle, value: f64) -> SearchOutcome {
        let change = lock(&self.facets).price_mut().input(handle, value);
        self.update_filter(change).await
    }

    /// Loads catalogue-wide facets. Failure leaves the panel as it was.
    pub async fn load_facets(&self) -> bool {
        match self.backend.facets().await {
            Ok(facets) => {
                let filters = self.state().filters().clone();
                lock(&self.facets).apply(&facets, &filters);
                true
            }
            Err(e) => {
                debug!("Facet load failed: {}", e);
                false
            }
        }
    }

    /// Forwards a keystroke to the debounced suggestion fetch.
    pub fn on_input(&self, text: &str) {
        self.suggestions.on_input(text);
    }

    /// Picks the dropdown item at `index`.
    pub async fn select_suggestion(&self, index: usize) -> Option<SearchOutcome> {
        let action = self.suggestions.select(index)?;
        Some(self.apply_suggestion(action).await)
    }

    pub async fn apply_suggestion(&self, action: SuggestionAction) -> SearchOutcome {
        self.suggestions.hide();
        match action {
            SuggestionAction::Query(text) => self.set_query(&text).await,
            SuggestionAction::Category(name) => {
                self.dispatch(Action::SetQuery(name.clone()));
                self.select_category(&name).await
            }
        }
    }

    /// Opens the detail modal for `id` and loads the full record. When the
    /// detail request fails, the card already on screen is shown instead.
    pub async fn show_product(&self, id: ProductId, viewport: Viewport) {
        lock(&self.modal).open(id.clone(), viewport);

        match self.backend.product(&id).await {
            Ok(product) => {
                lock(&self.modal).loaded(&id, product);
            }
            Err(e) => {
                warn!("Product {} details failed: {}", id, e);
                let card = lock(&self.view).find_card(&id).cloned();
                lock(&self.modal).failed(&id, card);
            }
        }
    }

    /// Closes the modal, returning the viewport to restore.
    pub fn close_product(&self, reason: DismissReason) -> Option<Viewport> {
        lock(&self.modal).dismiss(reason)
    }

    /// Runs a search for a voice transcript. Failures raise an alert.
    pub async fn voice_search(&self, recognizer: &dyn SpeechRecognizer) -> Option<SearchOutcome> {
        match recognizer.transcribe().await {
            Ok(transcript) if !transcript.trim().is_empty() => {
                info!("Voice query: {}", transcript);
                Some(self.set_query(&transcript).await)
            }
            Ok(_) => {
                self.raise_alert(self.messages.voice_failed);
                None
            }
            Err(ApiError::Unsupported(what)) => {
                debug!("{} unavailable", what);
                self.raise_alert(self.messages.speech_unsupported);
                None
            }
            Err(e) => {
                warn!("Voice recognition failed: {}", e);
                self.raise_alert(&format!("{}: {}", self.messages.voice_failed, e));
                None
            }
        }
    }

    /// Uploads an image and searches for what the service recognised in it.
    pub async fn image_search(&self, upload: ImageUpload) -> Option<SearchOutcome> {
        match self.backend.image_search(upload).await {
            Ok(result) => {
                let query = result.query();
                info!("Image query: {}", query);
                Some(self.set_query(&query).await)
            }
            Err(e) => {
                warn!("Image search failed: {}", e);
                self.raise_alert(self.messages.image_search_failed);
                None
            }
        }
    }

    fn raise_alert(&self, message: &str) {
        *lock(&self.alert) = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FacetEntry, Facets, PriceStats, Product, ResultsPage};
    use crate::i18n::Language;
    use crate::input::NoSpeechSupport;
    use crate::modal::ModalState;
    use crate::test_support::{make_page, MockBackend};
    use async_trait::async_trait;
    use std::time::Duration;

    fn english() -> Config {
        Config { language: Language::En, ..Config::default() }
    }

    fn make_controller(backend: MockBackend) -> (Arc<MockBackend>, SearchController<MockBackend>) {
        let backend = Arc::new(backend);
        let controller = SearchController::new(Arc::clone(&backend), &english());
        (backend, controller)
    }

    fn make_facets() -> Facets {
        Facets {
            brands: vec![FacetEntry::new("Bosch", 10), FacetEntry::new("Siemens", 4)],
            categories: vec![FacetEntry::new("Fridges", 14)],
            shops: vec![FacetEntry::new("Public", 14)],
            price_stats: Some(PriceStats::new(199.9, 1499.0)),
        }
    }

    #[tokio::test]
    async fn test_search_renders_results_and_categories() {
        let backend = MockBackend {
            categories: vec![crate::api::CategoryHit::new("Kettles", 9)],
            ..MockBackend::new().with_page("kettle", make_page("Kettle", 2, 2, 1))
        };
        let (backend, controller) = make_controller(backend);

        let outcome = controller.set_query("  kettle ").await;
        assert!(outcome.is_applied());

        let view = controller.view();
        assert!(!view.loading);
        assert_eq!(view.products().len(), 2);
        assert_eq!(view.categories[0].name, "Kettles");
        assert_eq!(backend.category_calls(), vec!["kettle"]);

        let params = &backend.search_calls()[0];
        assert_eq!(params.get("q"), Some("kettle"));
        assert_eq!(params.get("page"), Some("1"));
    }

    #[tokio::test]
    async fn test_run_applies_actions_then_searches_once() {
        let (backend, controller) = make_controller(MockBackend::new());

        let outcome = controller
            .run(
                vec![
                    Action::SetQuery("fridge".to_string()),
                    Action::SetSort(SortKey::PriceAsc),
                    Action::ChangeFilter(FilterChange::select(FacetKind::Brand, "Bosch")),
                ],
                3,
            )
            .await;
        assert!(outcome.is_applied());

        let calls = backend.search_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].get("page"), Some("3"));
        assert_eq!(calls[0].get("sort"), Some("price_asc"));
        assert_eq!(calls[0].get("brands"), Some("Bosch"));
        assert_eq!(controller.state().page(), 3);
    }

    #[tokio::test]
    async fn test_search_without_query_skips_category_lookup() {
        let (backend, controller) = make_controller(MockBackend::new());
        controller.search(1).await;
        assert!(backend.category_calls().is_empty());
        assert!(!backend.search_calls()[0].contains("q"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_render_before_category_lookup_completes() {
        let backend = MockBackend {
            categories: vec![crate::api::CategoryHit::new("Kettles", 9)],
            ..MockBackend::new()
                .with_page("kettle", make_page("Kettle", 2, 2, 1))
                .with_delay("kettle", Duration::from_millis(40))
                .with_category_delay("kettle", Duration::from_millis(500))
        };
        let (_, controller) = make_controller(backend);

        let (outcome, _) = tokio::join!(controller.set_query("kettle"), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let view = controller.view();
            assert!(!view.loading);
            assert_eq!(view.products().len(), 2);
            assert_eq!(view.elapsed_ms, Some(40));
            assert!(view.categories.is_empty());
        });

        assert!(outcome.is_applied());
        let view = controller.view();
        assert_eq!(view.categories[0].name, "Kettles");
        assert_eq!(view.elapsed_ms, Some(40));
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_category_lookup_is_discarded() {
        let backend = MockBackend {
            categories: vec![crate::api::CategoryHit::new("Kettles", 9)],
            ..MockBackend::new()
                .with_page("kettle", make_page("Kettle", 2, 2, 1))
                .with_page("", make_page("Everything", 3, 3, 1))
                .with_category_delay("kettle", Duration::from_millis(500))
        };
        let (backend, controller) = make_controller(backend);

        let (first, second) = tokio::join!(controller.set_query("kettle"), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            controller.set_query("").await
        });

        assert!(first.is_applied());
        assert!(second.is_applied());
        assert_eq!(backend.category_calls(), vec!["kettle"]);

        let view = controller.view();
        assert_eq!(view.products()[0].title, "Everything 1");
        assert!(view.categories.is_empty());
    }

    #[tokio::test]
    async fn test_failure_shows_banner_and_clears_loading() {
        let (_, controller) = make_controller(MockBackend { fail_search: true, ..MockBackend::new() });

        let outcome = controller.set_query("tv").await;
        assert!(matches!(outcome, SearchOutcome::Failed(ref e) if e.status() == Some(500)));

        let view = controller.view();
        assert!(!view.loading);
        assert_eq!(view.error.as_deref(), Some("Error while searching. Please try again."));
        assert!(view.products().is_empty());
        assert!(view.pagination().is_none());
    }

    #[tokio::test]
    async fn test_no_results_state() {
        let (_, controller) = make_controller(MockBackend::new());
        controller.set_query("nothing matches").await;

        let view = controller.view();
        assert!(view.is_no_results());
        assert!(view.pagination().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let backend = MockBackend::new()
            .with_page("slow", make_page("Slow", 1, 1, 1))
            .with_page("fast", make_page("Fast", 1, 1, 1))
            .with_delay("slow", Duration::from_millis(500))
            .with_delay("fast", Duration::from_millis(10));
        let (_, controller) = make_controller(backend);

        let (slow, fast) = tokio::join!(controller.set_query("slow"), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            controller.set_query("fast").await
        });

        assert!(matches!(slow, SearchOutcome::Superseded));
        assert!(fast.is_applied());

        let view = controller.view();
        assert_eq!(view.products()[0].title, "Fast 1");
        assert!(!view.loading);
        assert_eq!(controller.state().query(), "fast");
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_request_keeps_loading_for_latest() {
        let backend = MockBackend::new()
            .with_delay("first", Duration::from_millis(10))
            .with_delay("second", Duration::from_millis(500));
        let (_, controller) = make_controller(backend);

        let (first, _) = tokio::join!(controller.set_query("first"), async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            let pending = controller.set_query("second");
            tokio::pin!(pending);
            // Let "first" complete while "second" is in flight
            tokio::select! {
                _ = &mut pending => panic!("second finished too early"),
                _ = tokio::time::sleep(Duration::from_millis(100)) => {}
            }
            assert!(controller.view().loading);
            pending.await
        });
        assert!(matches!(first, SearchOutcome::Superseded));
        assert!(!controller.view().loading);
    }

    #[tokio::test]
    async fn test_update_filter_resets_page_and_updates_chips() {
        let (backend, controller) = make_controller(MockBackend::new());
        controller.search(3).await;
        assert_eq!(controller.state().page(), 3);

        controller.toggle_facet(FacetKind::Brand, "Bosch", true).await;
        assert_eq!(controller.state().page(), 1);

        let calls = backend.search_calls();
        assert_eq!(calls[1].get("page"), Some("1"));
        assert_eq!(calls[1].get("brands"), Some("Bosch"));
        assert_eq!(controller.view().active_filters[0].label, "Brand: Bosch");
    }

    #[tokio::test]
    async fn test_remove_filter_chip() {
        let (backend, controller) = make_controller(MockBackend::new());
        controller.update_filter(FilterChange::InStock(true)).await;

        let chip = controller.view().active_filters[0].clone();
        assert_eq!(chip.label, "In stock");
        controller.remove_filter(&chip).await;

        assert!(controller.state().filters().is_empty());
        assert!(controller.view().active_filters.is_empty());
        assert!(!backend.search_calls()[1].contains("stock"));
    }

    #[tokio::test]
    async fn test_clear_filters_resets_controls() {
        let backend = MockBackend { facets: Some(make_facets()), ..MockBackend::new() };
        let (backend, controller) = make_controller(backend);
        assert!(controller.load_facets().await);

        controller.input_price(Handle::Lower, 400.0).await;
        controller.toggle_facet(FacetKind::Shop, "Public", true).await;
        assert_eq!(backend.search_calls()[1].get("min_price"), Some("400"));

        controller.clear_filters().await;
        assert!(controller.state().filters().is_empty());
        assert_eq!(controller.facet_panel().price().handles(), (199.0, 1499.0));
        assert_eq!(backend.search_calls()[2].len(), 3);
    }

    #[tokio::test]
    async fn test_price_drag_commits_on_release_only() {
        let backend = MockBackend { facets: Some(make_facets()), ..MockBackend::new() };
        let (backend, controller) = make_controller(backend);
        controller.load_facets().await;

        controller.drag_price(Handle::Upper, 900.0);
        controller.drag_price(Handle::Upper, 800.0);
        assert!(backend.search_calls().is_empty());

        let outcome = controller.release_price().await;
        assert!(outcome.unwrap().is_applied());
        assert_eq!(backend.search_calls()[0].get("max_price"), Some("800"));
        assert!(controller.release_price().await.is_none());
    }

    #[tokio::test]
    async fn test_load_facets_failure_is_silent() {
        let (_, controller) = make_controller(MockBackend::new());
        assert!(!controller.load_facets().await);
        assert_eq!(controller.facet_panel(), FacetPanel::new());
        assert!(controller.view().error.is_none());
    }

    #[tokio::test]
    async fn test_empty_facets_in_results_leave_panel_untouched() {
        let mut page = make_page("Item", 1, 1, 1);
        page.facets = Some(Facets::default());
        let backend =
            MockBackend { facets: Some(make_facets()), default_page: page, ..MockBackend::new() };
        let (_, controller) = make_controller(backend);

        controller.load_facets().await;
        controller.set_facet_search(FacetKind::Brand, "sie");
        let before = controller.facet_panel();

        assert!(controller.search(1).await.is_applied());
        assert_eq!(controller.facet_panel(), before);
    }

    #[tokio::test]
    async fn test_category_suggestion_sets_query_and_filter() {
        let (backend, controller) = make_controller(MockBackend::new());
        controller.apply_suggestion(SuggestionAction::Category("Laptops".to_string())).await;

        let state = controller.state();
        assert_eq!(state.query(), "Laptops");
        assert!(state.filters().is_selected(FacetKind::Category, "Laptops"));
        let params = &backend.search_calls()[0];
        assert_eq!(params.get("categories"), Some("Laptops"));
        assert_eq!(params.get("type"), Some("products"));
    }

    #[tokio::test]
    async fn test_text_suggestion_sets_query() {
        let backend = MockBackend { suggestions: vec!["laptop bag".to_string()], ..MockBackend::new() };
        let (backend, controller) = make_controller(backend);

        controller.suggestions().fetch_now("lapt").await;
        let outcome = controller.select_suggestion(0).await;
        assert!(outcome.unwrap().is_applied());
        assert_eq!(controller.state().query(), "laptop bag");
        assert!(!controller.suggestions().dropdown().is_visible());
        assert_eq!(backend.search_calls()[0].get("q"), Some("laptop bag"));
    }

    #[tokio::test]
    async fn test_show_product_loads_details() {
        let product = Product {
            id: Some(ProductId::Number(5)),
            title: "Full record".to_string(),
            ..Default::default()
        };
        let (_, controller) = make_controller(MockBackend::new().with_product(product));

        controller.show_product(ProductId::Number(5), Viewport::default()).await;
        assert_eq!(controller.modal().product().unwrap().title, "Full record");
        assert!(controller.close_product(DismissReason::Escape).is_some());
        assert!(!controller.modal().is_open());
    }

    #[tokio::test]
    async fn test_show_product_falls_back_to_card() {
        let backend = MockBackend { default_page: make_page("Card", 3, 3, 1), ..MockBackend::new() };
        let (_, controller) = make_controller(backend);
        controller.search(1).await;

        let viewport = Viewport { scroll_offset: 1200, focused: Some("card-2".to_string()) };
        controller.show_product(ProductId::Number(2), viewport.clone()).await;
        assert!(matches!(controller.modal().state(), ModalState::FromCard(p) if p.title == "Card 2"));

        controller.show_product(ProductId::Number(99), Viewport::default()).await;
        assert_eq!(controller.modal().state(), &ModalState::Unavailable(ProductId::Number(99)));

        assert_eq!(controller.close_product(DismissReason::Backdrop), Some(viewport));
    }

    #[tokio::test]
    async fn test_voice_unsupported_raises_alert() {
        let (backend, controller) = make_controller(MockBackend::new());
        assert!(controller.voice_search(&NoSpeechSupport).await.is_none());
        assert_eq!(
            controller.take_alert().as_deref(),
            Some("Speech recognition is not supported in this environment.")
        );
        assert!(controller.take_alert().is_none());
        assert!(backend.search_calls().is_empty());
    }

    struct FixedTranscript(&'static str);

    #[async_trait]
    impl SpeechRecognizer for FixedTranscript {
        async fn transcribe(&self) -> crate::api::ApiResult<String> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_voice_transcript_searches() {
        let (_, controller) = make_controller(MockBackend::new());
        let outcome = controller.voice_search(&FixedTranscript("wireless mouse")).await;
        assert!(outcome.unwrap().is_applied());
        assert_eq!(controller.state().query(), "wireless mouse");

        assert!(controller.voice_search(&FixedTranscript("  ")).await.is_none());
        assert_eq!(controller.take_alert().as_deref(), Some("Voice recognition error"));
    }

    #[tokio::test]
    async fn test_image_search() {
        let backend = MockBackend {
            image_query: Some("red sneakers".to_string()),
            ..MockBackend::new().with_page("red sneakers", make_page("Sneaker", 4, 4, 1))
        };
        let (_, controller) = make_controller(backend);

        let outcome = controller.image_search(ImageUpload::new("shoe.png", vec![1, 2, 3])).await;
        assert!(outcome.unwrap().is_applied());
        assert_eq!(controller.view().products().len(), 4);

        let (_, controller) = make_controller(MockBackend::new());
        assert!(controller.image_search(ImageUpload::new("x.png", vec![0])).await.is_none());
        assert_eq!(
            controller.take_alert().as_deref(),
            Some("Image search failed. Please try again.")
        );
    }

    #[tokio::test]
    async fn test_results_facets_update_panel() {
        let mut page: ResultsPage = make_page("Item", 1, 1, 1);
        page.facets = Some(make_facets());
        let (_, controller) = make_controller(MockBackend { default_page: page, ..MockBackend::new() });

        controller.search(1).await;
        let panel = controller.facet_panel();
        assert_eq!(panel.list(FacetKind::Brand).entries().len(), 2);
        assert_eq!(panel.price().bounds(), Some((199.0, 1499.0)));
    }
}
