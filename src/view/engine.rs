//! The view engine: canonical records plus query state, and the derivation
//! filter → sort → page that turns them into what the user sees.

use crate::records::CanonicalSet;
use crate::types::{Record, RecordId, SortField, SortOrder};
use std::cmp::Ordering;
use std::num::NonZeroUsize;
use tracing::debug;

use super::pagination::{page_window, total_pages, PageWindow};
use super::query::QueryState;

/// Outcome of a page request.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// The requested page is now current.
    Moved,
    /// The request was outside `[1, total_pages]`; nothing changed.
    Ignored,
}

/// One derived page of the view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewPage {
    /// Records on the active page, in view order.
    pub items: Vec<Record>,
    pub page: usize,
    pub page_size: usize,
    /// Records matching the search, across all pages.
    pub total_items: usize,
    pub total_pages: usize,
}

impl ViewPage {
    /// 1-based positions of the first and last visible record within the
    /// filtered set, or None when the page is empty.
    pub fn record_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.page - 1) * self.page_size + 1;
        Some((first, first + self.items.len() - 1))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.items.iter().map(|r| r.id).collect()
    }
}

/// Owns the canonical set and the query state.
///
/// The view itself is never stored: every read re-derives it from the two,
/// so it cannot drift from either.
#[derive(Clone, Debug)]
pub struct ViewEngine {
    records: CanonicalSet,
    query: QueryState,
}

impl ViewEngine {
    /// Create an engine with an empty canonical set.
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            records: CanonicalSet::new(),
            query: QueryState::new(page_size),
        }
    }

    /// Create an engine over an initial listing.
    pub fn with_records(records: Vec<Record>, page_size: NonZeroUsize) -> Self {
        Self {
            records: CanonicalSet::from_records(records),
            query: QueryState::new(page_size),
        }
    }

    pub fn records(&self) -> &CanonicalSet {
        &self.records
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id)
    }

    // --- Canonical set ---

    /// Replace the canonical set with a fresh listing and go back to page 1.
    ///
    /// The active search and sort keep applying to the new records.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        self.records.replace_all(records);
        self.query.set_page(1);
    }

    /// Drop every record, leaving an empty view.
    pub fn clear(&mut self) {
        self.records.clear();
        self.query.set_page(1);
    }

    /// Upsert a single record. Returns true if it was new.
    ///
    /// The current page is clamped but otherwise kept; callers that want the
    /// post-save behavior follow up with [`ViewEngine::reapply_search`].
    pub fn upsert(&mut self, record: Record) -> bool {
        let inserted = self.records.upsert(record);
        self.clamp_page();
        inserted
    }

    // --- Query transitions ---

    /// Store the normalized term and go back to page 1.
    pub fn set_search(&mut self, term: &str) {
        self.query.set_search(term);
        debug!(term = self.query.search_term(), "search changed");
    }

    /// Re-derive with the last search term (page back to 1).
    pub fn reapply_search(&mut self) {
        let term = self.query.search_term().to_string();
        self.query.set_search(&term);
    }

    /// Sort by `field`, flipping direction if it is already the sorted
    /// column. Goes back to page 1.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.query.toggle_sort(field);
        debug!(?field, order = ?self.query.sort_order(), "sort changed");
    }

    /// Change the page size and go back to page 1.
    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.query.set_page_size(page_size);
    }

    /// Move to `page` if it exists; otherwise leave everything as is.
    pub fn go_to_page(&mut self, page: usize) -> Navigation {
        let total = self.total_pages();
        if page < 1 || page > total {
            debug!(page, total, "page request out of range ignored");
            return Navigation::Ignored;
        }
        self.query.set_page(page);
        Navigation::Moved
    }

    // --- Derivation ---

    /// Every record matching the search, in view order (ignores paging).
    pub fn filtered(&self) -> Vec<&Record> {
        let term = self.query.search_term();
        let mut matched: Vec<&Record> = self
            .records
            .iter()
            .filter(|record| matches_search(record, term))
            .collect();

        if let Some(field) = self.query.sort_field() {
            let order = self.query.sort_order();
            // `sort_by` is stable: equal keys keep canonical order in both
            // directions.
            matched.sort_by(|a, b| {
                let ordering = compare_by(field, a, b);
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        matched
    }

    /// Number of records matching the search.
    pub fn filtered_count(&self) -> usize {
        let term = self.query.search_term();
        self.records
            .iter()
            .filter(|record| matches_search(record, term))
            .count()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_count(), self.query.page_size())
    }

    /// Derive the active page.
    pub fn current_view(&self) -> ViewPage {
        let filtered = self.filtered();
        let page_size = self.query.page_size().get();
        let total_items = filtered.len();
        let total_pages = total_pages(total_items, self.query.page_size());
        let page = self.query.page().clamp(1, total_pages);

        let items: Vec<Record> = filtered
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect();

        debug!(page, total_items, visible = items.len(), "view derived");

        ViewPage {
            items,
            page,
            page_size,
            total_items,
            total_pages,
        }
    }

    /// Navigation bar for the active page.
    pub fn page_window(&self, max_visible: usize) -> PageWindow {
        page_window(self.query.page(), self.total_pages(), max_visible)
    }

    fn clamp_page(&mut self) {
        let total = self.total_pages();
        let page = self.query.page().clamp(1, total);
        self.query.set_page(page);
    }
}

/// Case-insensitive substring match on the title. `term` is already
/// normalized.
fn matches_search(record: &Record, term: &str) -> bool {
    term.is_empty() || record.title.to_lowercase().contains(term)
}

fn compare_by(field: SortField, a: &Record, b: &Record) -> Ordering {
    match field {
        // `+ 0.0` folds -0.0 into 0.0 so numerically equal prices tie
        SortField::Price => (a.price + 0.0).total_cmp(&(b.price + 0.0)),
        SortField::Title => a
            .title
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.title.chars().flat_map(char::to_lowercase)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, title: &str, price: f64) -> Record {
        Record {
            id: RecordId(id),
            title: title.to_string(),
            price,
            category: "Misc".into(),
            description: String::new(),
            images: vec!["http://x/i.png".into()],
        }
    }

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn catalog() -> Vec<Record> {
        vec![
            record(1, "Banana", 3.0),
            record(2, "apple", 5.0),
            record(3, "Cherry", 3.0),
            record(4, "apricot", 1.5),
            record(5, "blueberry", 5.0),
        ]
    }

    fn ids(records: &[&Record]) -> Vec<u64> {
        records.iter().map(|r| r.id.0).collect()
    }

    #[test]
    fn test_unsorted_view_keeps_canonical_order() {
        let engine = ViewEngine::with_records(catalog(), size(10));
        assert_eq!(ids(&engine.filtered()), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_search_is_case_insensitive_on_title() {
        let mut engine = ViewEngine::with_records(catalog(), size(10));
        engine.set_search("  AP ");

        assert_eq!(ids(&engine.filtered()), vec![2, 4]);
        assert_eq!(engine.query().search_term(), "ap");
    }

    #[test]
    fn test_sort_title_ignores_case() {
        let mut engine = ViewEngine::with_records(catalog(), size(10));
        engine.toggle_sort(SortField::Title);

        assert_eq!(ids(&engine.filtered()), vec![2, 4, 1, 5, 3]);
    }

    #[test]
    fn test_price_descending_keeps_ties_stable() {
        let mut engine = ViewEngine::with_records(catalog(), size(10));
        engine.toggle_sort(SortField::Price);
        assert_eq!(ids(&engine.filtered()), vec![4, 1, 3, 2, 5]);

        engine.toggle_sort(SortField::Price);
        assert_eq!(ids(&engine.filtered()), vec![2, 5, 1, 3, 4]);

        engine.toggle_sort(SortField::Price);
        assert_eq!(ids(&engine.filtered()), vec![4, 1, 3, 2, 5]);
    }

    #[test]
    fn test_signed_zero_prices_tie() {
        let records = vec![record(1, "a", 0.0), record(2, "b", -0.0), record(3, "c", 0.0)];
        let mut engine = ViewEngine::with_records(records, size(10));

        engine.toggle_sort(SortField::Price);
        assert_eq!(ids(&engine.filtered()), vec![1, 2, 3]);

        engine.toggle_sort(SortField::Price);
        assert_eq!(ids(&engine.filtered()), vec![1, 2, 3]);
    }

    #[test]
    fn test_paging_and_bounds() {
        let mut engine = ViewEngine::with_records(catalog(), size(2));
        assert_eq!(engine.total_pages(), 3);

        assert_eq!(engine.go_to_page(3), Navigation::Moved);
        let view = engine.current_view();
        assert_eq!(view.ids(), vec![RecordId(5)]);
        assert_eq!(view.record_range(), Some((5, 5)));

        assert_eq!(engine.go_to_page(0), Navigation::Ignored);
        assert_eq!(engine.go_to_page(4), Navigation::Ignored);
        assert_eq!(engine.query().page(), 3);
    }

    #[test]
    fn test_empty_set_has_one_page() {
        let engine = ViewEngine::new(size(10));
        let view = engine.current_view();

        assert_eq!(view.total_pages, 1);
        assert_eq!(view.page, 1);
        assert!(view.is_empty());
        assert_eq!(view.record_range(), None);
    }

    #[test]
    fn test_upsert_clamps_page() {
        let mut engine = ViewEngine::with_records(catalog(), size(2));
        engine.set_search("apple");
        assert_eq!(engine.total_pages(), 1);

        let _ = engine.go_to_page(1);
        engine.upsert(record(2, "pear", 5.0));

        assert_eq!(engine.query().page(), 1);
        assert_eq!(engine.filtered_count(), 0);
    }

    #[test]
    fn test_replace_records_resets_page_keeps_search() {
        let mut engine = ViewEngine::with_records(catalog(), size(1));
        engine.set_search("b");
        let _ = engine.go_to_page(2);

        engine.replace_records(vec![record(7, "Blackberry", 2.0), record(8, "Fig", 2.0)]);

        assert_eq!(engine.query().page(), 1);
        assert_eq!(engine.current_view().ids(), vec![RecordId(7)]);
    }
}
