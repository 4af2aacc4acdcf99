//! Fixed-size pagination over an ordered collection.
//!
//! The controller never rejects an out-of-range page — it returns an empty
//! slice and leaves clamping to the navigation caller. It also never resets
//! the page on its own; resetting on a new search is the orchestrator's
//! responsibility.

use serde::Serialize;

/// One page of an ordered collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
    pub current_page: usize,
}

/// Slices `items` into page `current_page` (1-based) of size `page_size`.
/// An empty collection is still "page 1 of 1". A `page_size` of 0 is
/// treated as 1.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, current_page: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size).max(1);

    let start = current_page.saturating_sub(1).saturating_mul(page_size);
    let page_items = if start >= items.len() {
        Vec::new()
    } else {
        let end = (start + page_size).min(items.len());
        items[start..end].to_vec()
    };

    Page {
        items: page_items,
        total_pages,
        current_page,
    }
}
