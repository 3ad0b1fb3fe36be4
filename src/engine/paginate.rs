//! Fixed-size page slicing
//!
//! Pages are 1-based. Nothing here clamps the requested page: callers decide
//! what to do with out-of-range requests (see [`clamp_page`]).

use std::ops::RangeInclusive;

/// Slice `items` down to page `page` of `page_size` entries
///
/// Returns an empty slice when the page starts past the end. Page 0 is
/// read as page 1, and a zero page size always yields an empty page.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `len` items (0 for an empty sequence)
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Pull a requested page into `[1, max(total_pages, 1)]`
///
/// An empty result set has zero pages, but navigation still lives on page 1.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Window of page numbers to show when at most `max_buttons` fit
///
/// The window keeps `current` roughly centered and slides against either
/// end. Empty when there are no pages.
pub fn page_window(
    current: usize,
    total_pages: usize,
    max_buttons: usize,
) -> RangeInclusive<usize> {
    if total_pages == 0 || max_buttons == 0 {
        return RangeInclusive::new(1, 0);
    }
    if total_pages <= max_buttons {
        return 1..=total_pages;
    }

    let current = clamp_page(current, total_pages);
    let half = max_buttons / 2;
    let mut start = current.saturating_sub(half).max(1);
    let mut end = start + max_buttons - 1;
    if end > total_pages {
        end = total_pages;
        start = end + 1 - max_buttons;
    }
    start..=end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixteen_items_two_pages() {
        let ids: Vec<u32> = (1..=16).collect();
        assert_eq!(paginate(&ids, 1, 15), &(1..=15).collect::<Vec<_>>()[..]);
        assert_eq!(paginate(&ids, 2, 15), &[16]);
        assert_eq!(total_pages(ids.len(), 15), 2);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let ids = [1, 2, 3];
        assert!(paginate(&ids, 2, 3).is_empty());
        assert!(paginate(&ids, 99, 3).is_empty());
    }

    #[test]
    fn test_empty_sequence_has_zero_pages() {
        let empty: [u8; 0] = [];
        assert_eq!(total_pages(empty.len(), 15), 0);
        assert!(paginate(&empty, 1, 15).is_empty());
    }

    #[test]
    fn test_page_zero_reads_as_first_page() {
        let ids = [1, 2, 3, 4];
        assert_eq!(paginate(&ids, 0, 2), &[1, 2]);
    }

    #[test]
    fn test_zero_page_size() {
        let ids = [1, 2, 3];
        assert!(paginate(&ids, 1, 0).is_empty());
        assert_eq!(total_pages(ids.len(), 0), 0);
    }

    #[test]
    fn test_pages_reconstruct_sequence() {
        for len in 0..40usize {
            for size in 1..9usize {
                let items: Vec<usize> = (0..len).collect();
                let pages = total_pages(len, size);
                let mut rebuilt = Vec::new();
                for page in 1..=pages {
                    let slice = paginate(&items, page, size);
                    assert!(slice.len() <= size);
                    assert!(!slice.is_empty());
                    rebuilt.extend_from_slice(slice);
                }
                assert_eq!(rebuilt, items, "len={len} size={size}");
            }
        }
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 5), 1);
        assert_eq!(clamp_page(3, 5), 3);
        assert_eq!(clamp_page(9, 5), 5);
        // Zero and one total pages behave the same
        assert_eq!(clamp_page(4, 0), 1);
        assert_eq!(clamp_page(4, 1), 1);
    }

    #[test]
    fn test_page_window_fits_everything() {
        assert_eq!(page_window(2, 4, 7), 1..=4);
        assert!(page_window(1, 0, 7).is_empty());
    }

    #[test]
    fn test_page_window_slides() {
        assert_eq!(page_window(1, 20, 5), 1..=5);
        assert_eq!(page_window(10, 20, 5), 8..=12);
        assert_eq!(page_window(20, 20, 5), 16..=20);
        assert_eq!(page_window(19, 20, 4), 17..=20);
    }
}
