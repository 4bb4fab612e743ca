//! Sliding-window pagination.

use serde::Serialize;

/// Pages shown on each side of the current page.
const WINDOW: u32 = 2;

/// One pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "lowercase")]
pub enum PageItem {
    Prev(u32),
    Page(u32),
    Current(u32),
    Ellipsis,
    Next(u32),
}

/// Pagination controls for one results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current: u32,
    pub total_pages: u32,
    pub items: Vec<PageItem>,
}

impl Pagination {
    /// Builds the controls, or `None` when there is at most one page.
    pub fn new(current: u32, total_pages: u32) -> Option<Self> {
        if total_pages <= 1 {
            return None;
        }
        let current = current.clamp(1, total_pages);
        let start = current.saturating_sub(WINDOW).max(1);
        let end = current.saturating_add(WINDOW).min(total_pages);

        let mut items = Vec::new();
        if current > 1 {
            items.push(PageItem::Prev(current - 1));
        }

        if start > 1 {
            items.push(PageItem::Page(1));
            if start > 2 {
                items.push(PageItem::Ellipsis);
            }
        }

        for page in start..=end {
            items.push(if page == current { PageItem::Current(page) } else { PageItem::Page(page) });
        }

        if end < total_pages {
            if end < total_pages.saturating_sub(1) {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page(total_pages));
        }

        if current < total_pages {
            items.push(PageItem::Next(current + 1));
        }

        Some(Self { current, total_pages, items })
    }

    /// Every numbered page shown, including the current one.
    pub fn numbered_pages(&self) -> Vec<u32> {
        self.items
            .iter()
            .filter_map(|item| match item {
                PageItem::Page(p) | PageItem::Current(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    /// Compact one-line rendering: `‹ 1 … 3 4 [5] 6 7 … 10 ›`.
    pub fn render(&self) -> String {
        self.items
            .iter()
            .map(|item| match item {
                PageItem::Prev(_) => "‹".to_string(),
                PageItem::Page(p) => p.to_string(),
                PageItem::Current(p) => format!("[{}]", p),
                PageItem::Ellipsis => "…".to_string(),
                PageItem::Next(_) => "›".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
