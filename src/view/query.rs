//! Query state driving view derivation.

use crate::types::{SortField, SortOrder};
use std::num::NonZeroUsize;

/// Normalize raw search input: trimmed and lower-cased.
pub fn normalize_search(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Search, sort and paging inputs of the view.
///
/// Every transition that changes what the filtered set looks like (search,
/// sort, page size) resets `page` to 1. Clamping against the filtered count
/// is done by the engine, which knows the records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryState {
    search_term: String,
    sort_field: Option<SortField>,
    sort_order: SortOrder,
    page: usize,
    page_size: NonZeroUsize,
}

impl QueryState {
    /// Defaults: no search, no sort, page 1.
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            search_term: String::new(),
            sort_field: None,
            sort_order: SortOrder::Ascending,
            page: 1,
            page_size,
        }
    }

    /// The normalized search term (empty matches everything).
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_field(&self) -> Option<SortField> {
        self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Active direction for `field`, if it is the sorted column.
    pub fn sort_indicator(&self, field: SortField) -> Option<SortOrder> {
        (self.sort_field == Some(field)).then_some(self.sort_order)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub(crate) fn set_search(&mut self, term: &str) {
        self.search_term = normalize_search(term);
        self.page = 1;
    }

    /// Same field flips direction; a new field starts ascending.
    pub(crate) fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == Some(field) {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_field = Some(field);
            self.sort_order = SortOrder::Ascending;
        }
        self.page = 1;
    }

    pub(crate) fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.page_size = page_size;
        self.page = 1;
    }

    pub(crate) fn set_page(&mut self, page: usize) {
        self.page = page;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> QueryState {
        QueryState::new(NonZeroUsize::new(10).unwrap())
    }

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search("  Apple WATCH "), "apple watch");
        assert_eq!(normalize_search("   "), "");
    }

    #[test]
    fn test_toggle_same_field_flips() {
        let mut q = state();
        q.toggle_sort(SortField::Price);
        assert_eq!(q.sort_indicator(SortField::Price), Some(SortOrder::Ascending));

        q.toggle_sort(SortField::Price);
        assert_eq!(q.sort_indicator(SortField::Price), Some(SortOrder::Descending));
        assert_eq!(q.sort_indicator(SortField::Title), None);
    }

    #[test]
    fn test_toggle_new_field_starts_ascending() {
        let mut q = state();
        q.toggle_sort(SortField::Price);
        q.toggle_sort(SortField::Price);
        q.toggle_sort(SortField::Title);

        assert_eq!(q.sort_field(), Some(SortField::Title));
        assert_eq!(q.sort_order(), SortOrder::Ascending);
    }

    #[test]
    fn test_transitions_reset_page() {
        let mut q = state();

        q.set_page(4);
        q.set_search("x");
        assert_eq!(q.page(), 1);

        q.set_page(4);
        q.toggle_sort(SortField::Title);
        assert_eq!(q.page(), 1);

        q.set_page(4);
        q.set_page_size(NonZeroUsize::new(5).unwrap());
        assert_eq!(q.page(), 1);
    }
}
