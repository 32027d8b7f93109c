//! Page arithmetic and the navigation window.

use std::num::NonZeroUsize;

/// Number of pages for `total_items`, never less than 1.
pub fn total_pages(total_items: usize, page_size: NonZeroUsize) -> usize {
    total_items.div_ceil(page_size.get()).max(1)
}

/// One entry of the page navigation bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageLink {
    Page { number: usize, current: bool },
    Ellipsis,
}

/// Navigation bar for the current page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageWindow {
    /// Target of the "previous" control, None when disabled.
    pub previous: Option<usize>,
    /// Target of the "next" control, None when disabled.
    pub next: Option<usize>,
    pub links: Vec<PageLink>,
}

impl PageWindow {
    /// Hidden when there is nothing to navigate.
    pub fn is_hidden(&self) -> bool {
        self.links.is_empty()
    }

    /// Page numbers shown, in order.
    pub fn page_numbers(&self) -> Vec<usize> {
        self.links
            .iter()
            .filter_map(|link| match link {
                PageLink::Page { number, .. } => Some(*number),
                PageLink::Ellipsis => None,
            })
            .collect()
    }
}

/// Build the navigation window around `page`.
///
/// At most `max_visible` consecutive numbers centered on the current page,
/// shifted to stay inside `[1, total_pages]`. The first and last page are
/// always linked, with an ellipsis when the window does not touch them.
pub fn page_window(page: usize, total_pages: usize, max_visible: usize) -> PageWindow {
    if total_pages <= 1 {
        return PageWindow::default();
    }

    let max_visible = max_visible.max(1);
    let page = page.clamp(1, total_pages);

    let mut start = page.saturating_sub(max_visible / 2).max(1);
    let end = start.saturating_add(max_visible - 1).min(total_pages);
    if end - start < max_visible - 1 {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }

    // Bounded by the page count, not by `max_visible`
    let mut links = Vec::with_capacity(end - start + 5);

    if start > 1 {
        links.push(PageLink::Page { number: 1, current: false });
        if start > 2 {
            links.push(PageLink::Ellipsis);
        }
    }

    for number in start..=end {
        links.push(PageLink::Page {
            number,
            current: number == page,
        });
    }

    if end < total_pages {
        if end < total_pages - 1 {
            links.push(PageLink::Ellipsis);
        }
        links.push(PageLink::Page {
            number: total_pages,
            current: false,
        });
    }

    PageWindow {
        previous: (page > 1).then(|| page - 1),
        next: (page < total_pages).then(|| page + 1),
        links,
    }
}
