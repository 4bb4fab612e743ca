//! Price range filter and the dual-handle price slider.

use super::FilterChange;
use crate::api::PriceStats;
use serde::{Deserialize, Serialize};

/// Price bounds; `None` on a side means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    /// Creates a range, dropping negative or non-finite bounds and ordering the rest.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        let valid = |v: Option<f64>| v.filter(|v| v.is_finite() && *v >= 0.0);
        match (valid(min), valid(max)) {
            (Some(lo), Some(hi)) if lo > hi => Self { min: Some(hi), max: Some(lo) },
            (min, max) => Self { min, max },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// `€10 - €250`, with `0` and `∞` for open sides.
    pub fn label(&self) -> String {
        let min = self.min.map(format_bound).unwrap_or_else(|| "0".to_string());
        let max = self.max.map(format_bound).unwrap_or_else(|| "∞".to_string());
        format!("€{} - €{}", min, max)
    }
}

/// Formats a price bound without trailing zeros: `10`, `10.5`, `10.25`.
pub fn format_bound(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Which slider handle an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Lower,
    Upper,
}

/// Dual-handle slider synchronised with the two numeric price inputs.
///
/// Both views read the same handle values. Dragging moves a handle without
/// committing; releasing it, or editing an input, yields the filter change.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSlider {
    bounds: Option<(f64, f64)>,
    lower: f64,
    upper: f64,
    dragging: bool,
}

impl Default for PriceSlider {
    fn default() -> Self {
        Self { bounds: None, lower: 0.0, upper: f64::INFINITY, dragging: false }
    }
}

impl PriceSlider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts new facet price bounds and positions handles from the current range.
    /// Stats without a usable minimum leave the slider untouched.
    pub fn set_bounds(&mut self, stats: &PriceStats, current: PriceRange) -> bool {
        let Some((lo, hi)) = stats.bounds() else {
            return false;
        };
        self.bounds = Some((lo, hi));
        self.lower = current.min.unwrap_or(lo);
        self.upper = current.max.unwrap_or(hi);
        self.clamp();
        true
    }

    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.bounds
    }

    pub fn handles(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Text shown in the min/max numeric inputs.
    pub fn input_values(&self) -> (String, String) {
        let show = |v: f64| if v.is_finite() { format_bound(v) } else { String::new() };
        (show(self.lower), show(self.upper))
    }

    /// Moves a handle while the pointer is down. Nothing is committed.
    pub fn drag(&mut self, handle: Handle, value: f64) {
        self.dragging = true;
        self.set_handle(handle, value);
    }

    /// Pointer released: commits the handle positions.
    pub fn release(&mut self) -> Option<FilterChange> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        Some(FilterChange::Price(self.range()))
    }

    /// A numeric input was edited: moves the handle and commits at once.
    pub fn input(&mut self, handle: Handle, value: f64) -> FilterChange {
        self.dragging = false;
        self.set_handle(handle, value);
        FilterChange::Price(self.range())
    }

    /// Back to the full facet range.
    pub fn reset(&mut self) {
        self.dragging = false;
        match self.bounds {
            Some((lo, hi)) => {
                self.lower = lo;
                self.upper = hi;
            }
            None => {
                self.lower = 0.0;
                self.upper = f64::INFINITY;
            }
        }
    }

    /// The committed range. A handle resting on its bound leaves that side open.
    pub fn range(&self) -> PriceRange {
        let (min, max) = match self.bounds {
            Some((lo, hi)) => {
                ((self.lower > lo).then_some(self.lower), (self.upper < hi).then_some(self.upper))
            }
            None => (
                (self.lower > 0.0).then_some(self.lower),
                self.upper.is_finite().then_some(self.upper),
            ),
        };
        PriceRange::new(min, max)
    }

    fn set_handle(&mut self, handle: Handle, value: f64) {
        if !value.is_finite() {
            return;
        }
        match handle {
            Handle::Lower => self.lower = value.min(self.upper),
            Handle::Upper => self.upper = value.max(self.lower),
        }
        self.clamp();
    }

    fn clamp(&mut self) {
        if let Some((lo, hi)) = self.bounds {
            self.lower = self.lower.clamp(lo, hi);
            self.upper = self.upper.clamp(lo, hi);
        } else {
            self.lower = self.lower.max(0.0);
        }
        if self.lower > self.upper {
            std::mem::swap(&mut self.lower, &mut self.upper);
        }
    }
}
