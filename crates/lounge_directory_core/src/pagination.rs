//! crates/lounge_directory_core/src/pagination.rs
//!
//! Slices a filtered result set into fixed-size pages and computes the
//! page-number buttons shown around the current page.

use std::ops::RangeInclusive;

/// Page size of the lounge listing.
pub const LOUNGES_PER_PAGE: usize = 24;

/// Upper bound on the number of page buttons in the window.
pub const MAX_PAGE_BUTTONS: usize = 5;

/// One page of results together with its position in the whole set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    items: &'a [T],
    current_page: usize,
    total_pages: usize,
    total_items: usize,
    page_size: usize,
}

impl<'a, T> Page<'a, T> {
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Never less than 1, even for an empty result set.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    fn start_index(&self) -> usize {
        (self.current_page - 1) * self.page_size
    }

    /// 1-based position of the first item on this page, or 0 when empty.
    pub fn first_item_number(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.start_index() + 1
        }
    }

    /// 1-based position of the last item on this page, or 0 when empty.
    pub fn last_item_number(&self) -> usize {
        self.start_index() + self.items.len()
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        page_window(self.current_page, self.total_pages).collect()
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Returns page `requested_page` (1-based) of `items`.
///
/// Out-of-range requests are clamped to the nearest existing page.
pub fn paginate<T>(items: &[T], page_size: usize, requested_page: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let current_page = requested_page.clamp(1, total_pages);

    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(items.len());

    Page {
        items: &items[start.min(end)..end],
        current_page,
        total_pages,
        total_items: items.len(),
        page_size,
    }
}

/// The page buttons to show: all pages when there are at most five, the
/// first five near the start, the last five near the end, and otherwise
/// two either side of `current`.
pub fn page_window(current: usize, total: usize) -> RangeInclusive<usize> {
    let total = total.max(1);
    let current = current.clamp(1, total);

    if total <= MAX_PAGE_BUTTONS || current <= 3 {
        1..=total.min(MAX_PAGE_BUTTONS)
    } else if current + 2 >= total {
        (total - 4)..=total
    } else {
        (current - 2)..=(current + 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn slices_requested_page() {
        let items: Vec<u32> = (1..=50).collect();

        let page = paginate(&items, LOUNGES_PER_PAGE, 2);
        assert_eq!(page.items().first(), Some(&25));
        assert_eq!(page.items().len(), 24);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.first_item_number(), 25);
        assert_eq!(page.last_item_number(), 48);
        assert!(page.has_previous());
        assert!(page.has_next());

        let last = paginate(&items, LOUNGES_PER_PAGE, 3);
        assert_eq!(last.items(), &[49, 50]);
        assert!(!last.has_next());
    }

    #[test]
    fn empty_set_still_has_one_page() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, LOUNGES_PER_PAGE, 1);

        assert_eq!(page.total_pages(), 1);
        assert_eq!(page.current_page(), 1);
        assert!(page.items().is_empty());
        assert_eq!(page.first_item_number(), 0);
        assert_eq!(page.last_item_number(), 0);
        assert_eq!(page.page_numbers(), vec![1]);
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let items: Vec<u32> = (0..30).collect();

        assert_eq!(paginate(&items, 24, 9).current_page(), 2);
        assert_eq!(paginate(&items, 24, 0).current_page(), 1);
    }

    #[test]
    fn window_follows_current_page() {
        let window = |current, total| page_window(current, total).collect::<Vec<_>>();

        assert_eq!(window(1, 3), vec![1, 2, 3]);
        assert_eq!(window(2, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(window(3, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(window(4, 10), vec![2, 3, 4, 5, 6]);
        assert_eq!(window(8, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(window(10, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(window(7, 10), vec![5, 6, 7, 8, 9]);
    }

    proptest! {
        #[test]
        fn pages_partition_the_result_set(count in 0usize..200, page_size in 1usize..40) {
            let items: Vec<usize> = (0..count).collect();
            let pages = total_pages(count, page_size);

            let mut seen = Vec::new();
            for n in 1..=pages {
                let page = paginate(&items, page_size, n);
                if n < pages {
                    prop_assert_eq!(page.items().len(), page_size);
                }
                seen.extend_from_slice(page.items());
            }
            prop_assert_eq!(seen, items);
        }

        #[test]
        fn window_is_contiguous_and_contains_current(current in 1usize..100, total in 1usize..100) {
            let current = current.min(total);
            let window: Vec<usize> = page_window(current, total).collect();

            prop_assert!(window.len() <= MAX_PAGE_BUTTONS);
            prop_assert_eq!(window.len(), total.min(MAX_PAGE_BUTTONS));
            prop_assert!(window.contains(&current));
            prop_assert!(*window.last().unwrap() <= total);
        }
    }
}
