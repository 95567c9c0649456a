//! Pagination arithmetic for the translation listing.
//!
//! Pages are 1-based. The visible window shows at most five page links,
//! centered on the current page and pushed back from the ends.

pub const DEFAULT_PAGE_SIZE: usize = 10;

const MAX_VISIBLE_PAGES: usize = 5;

pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// `(start, end)` item indices of `page`, end-exclusive, clamped to
/// `total` so an out-of-range page yields an empty slice.
pub fn page_bounds(page: usize, total: usize, per_page: usize) -> (usize, usize) {
    let start = (page.max(1) - 1).saturating_mul(per_page).min(total);
    let end = start.saturating_add(per_page).min(total);
    (start, end)
}

/// The page numbers to display as links.
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }
    let mut start = current.saturating_sub(2).max(1);
    let end = (start + MAX_VISIBLE_PAGES - 1).min(total_pages);
    if end == total_pages {
        start = end.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1);
    }
    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(5, 0), 0);
    }

    #[test]
    fn page_bounds_slices() {
        assert_eq!(page_bounds(1, 25, 10), (0, 10));
        assert_eq!(page_bounds(2, 25, 10), (10, 20));
        assert_eq!(page_bounds(3, 25, 10), (20, 25));
    }

    #[test]
    fn page_bounds_past_end_is_empty() {
        let (start, end) = page_bounds(9, 25, 10);
        assert_eq!(start, end);
    }

    #[test]
    fn window_is_centered_mid_range() {
        assert_eq!(page_window(7, 10), [5, 6, 7, 8, 9]);
    }

    #[test]
    fn window_clamps_at_start() {
        assert_eq!(page_window(1, 10), [1, 2, 3, 4, 5]);
        assert_eq!(page_window(2, 10), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn window_clamps_at_end() {
        assert_eq!(page_window(9, 10), [6, 7, 8, 9, 10]);
        assert_eq!(page_window(10, 10), [6, 7, 8, 9, 10]);
    }

    #[test]
    fn window_shorter_than_max() {
        assert_eq!(page_window(2, 3), [1, 2, 3]);
        assert_eq!(page_window(1, 1), [1]);
        assert!(page_window(1, 0).is_empty());
    }
}
