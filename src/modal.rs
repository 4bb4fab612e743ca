//! Product detail modal.

use crate::api::{Product, ProductId};
use serde::Serialize;
use tracing::debug;

/// Page position saved when the modal opens and restored when it closes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub scroll_offset: u32,
    /// Element that had focus, e.g. the card that was clicked
    pub focused: Option<String>,
}

/// How the modal was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    CloseButton,
    Backdrop,
    Escape,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "product", rename_all = "snake_case")]
pub enum ModalState {
    #[default]
    Closed,
    Loading(ProductId),
    /// Full record from `/product/{id}`
    Loaded(Box<Product>),
    /// Detail request failed; showing the card already on screen
    FromCard(Box<Product>),
    Unavailable(ProductId),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductModal {
    state: ModalState,
    #[serde(skip)]
    saved: Option<Viewport>,
}

impl ProductModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, ModalState::Closed)
    }

    /// Opens in the loading state. Reopening keeps the viewport saved first.
    pub fn open(&mut self, id: ProductId, viewport: Viewport) {
        if self.saved.is_none() {
            self.saved = Some(viewport);
        }
        self.state = ModalState::Loading(id);
    }

    fn awaiting(&self, id: &ProductId) -> bool {
        matches!(&self.state, ModalState::Loading(current) if current == id)
    }

    /// Detail arrived. Ignored unless the modal is still waiting for `id`.
    pub fn loaded(&mut self, id: &ProductId, product: Product) -> bool {
        if !self.awaiting(id) {
            debug!("Ignoring late detail for product {}", id);
            return false;
        }
        self.state = ModalState::Loaded(Box::new(product));
        true
    }

    /// Detail request failed; falls back to the visible card when there is one.
    pub fn failed(&mut self, id: &ProductId, card: Option<Product>) -> bool {
        if !self.awaiting(id) {
            debug!("Ignoring late failure for product {}", id);
            return false;
        }
        self.state = match card {
            Some(product) => ModalState::FromCard(Box::new(product)),
            None => ModalState::Unavailable(id.clone()),
        };
        true
    }

    /// Closes the modal and hands back the viewport to restore.
    pub fn dismiss(&mut self, reason: DismissReason) -> Option<Viewport> {
        if !self.is_open() {
            return None;
        }
        debug!("Modal dismissed: {:?}", reason);
        self.state = ModalState::Closed;
        Some(self.saved.take().unwrap_or_default())
    }

    /// Product currently displayed, if any.
    pub fn product(&self) -> Option<&Product> {
        match &self.state {
            ModalState::Loaded(product) | ModalState::FromCard(product) => Some(product),
            _ => None,
        }
    }
}
