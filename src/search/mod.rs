//! Query state, request sequencing and the search controller.

pub mod controller;
pub mod query;
pub mod sequence;
pub mod state;
pub mod view;

pub use controller::{SearchController, SearchOutcome};
pub use query::build_params;
pub use sequence::{RequestSequence, RequestToken};
pub use state::{Action, SearchState, SearchType, SortKey};
pub use view::{ResultStats, ResultsView};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks a view-state mutex. Sections never await, so a poisoned lock still
/// holds consistent data and is recovered.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
