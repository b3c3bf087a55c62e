/// Pure windowing math shared by both page sources. Pages are 1-indexed.
///
/// There is deliberately no clamping here: a page past the end of the
/// filtered collection yields an empty window, and callers decide whether
/// that state is reachable (navigation guards keep it out of normal use).
pub fn total_pages(item_count: usize, per_page: usize) -> u32 {
    if per_page == 0 {
        return 0;
    }
    item_count.div_ceil(per_page) as u32
}

/// Returns the slice of `items` visible on `page`.
pub fn window<T>(items: &[T], page: u32, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page as usize - 1) * per_page;
    if start >= items.len() {
        return &[];
    }
    let end = usize::min(start + per_page, items.len());
    &items[start..end]
}

/// Enablement of the previous/next controls for a given page position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControls {
    pub can_prev: bool,
    pub can_next: bool,
}

impl PageControls {
    pub fn at(page: u32, total_pages: u32) -> Self {
        Self {
            can_prev: page > 1,
            can_next: total_pages > 0 && page < total_pages,
        }
    }
}
