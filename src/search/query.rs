//! Serialises search state into `/search` query parameters.

use super::state::SearchState;
use crate::api::QueryParams;

/// `{page, per_page, type, q?, sort?, ...filters}`; empty values are left out.
pub fn build_params(state: &SearchState) -> QueryParams {
    let mut params = QueryParams::new();
    params
        .set("page", state.page().to_string())
        .set("per_page", state.per_page().to_string())
        .set("type", state.search_type().param())
        .set("q", state.query())
        .set_opt("sort", state.sort().param());
    state.filters().write_params(&mut params);
    params
}
