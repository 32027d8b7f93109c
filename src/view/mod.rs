//! Derived view over the canonical set.
//!
//! The order of operations is fixed: filter by search term, then sort, then
//! slice out the active page. Query transitions that change the filtered
//! set or its slicing reset the page to 1, and the page never leaves
//! `[1, total_pages]`.

mod engine;
mod pagination;
mod query;

pub use engine::{Navigation, ViewEngine, ViewPage};
pub use pagination::{page_window, total_pages, PageLink, PageWindow};
pub use query::{normalize_search, QueryState};
