//! Splitting the sorted records into printed pages.
//!
//! Both templates use a single page size for counting pages and for slicing
//! them, so the last page always carries the remainder and nothing is
//! printed twice or dropped.

/// Line items per full-statement page
pub const STATEMENT_ROWS_PER_PAGE: usize = 26;

/// Receipt tiles per sheet (2 columns x 4 rows)
pub const RECEIPTS_PER_PAGE: usize = 8;

/// One printed page worth of items
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// 1-based page number
    pub number: usize,
    /// Position of `items[0]` in the whole list, 0-based
    pub offset: usize,
    pub items: &'a [T],
    pub is_first: bool,
    pub is_last: bool,
}

/// Number of pages needed for `len` items
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size)
}

/// Split `items` into consecutive pages of at most `page_size` items
pub fn paginate<T>(items: &[T], page_size: usize) -> Vec<Page<'_, T>> {
    assert!(page_size > 0, "page size must be positive");

    let count = page_count(items.len(), page_size);
    items
        .chunks(page_size)
        .enumerate()
        .map(|(i, chunk)| Page {
            number: i + 1,
            offset: i * page_size,
            items: chunk,
            is_first: i == 0,
            is_last: i + 1 == count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_exhaustive_and_non_overlapping() {
        for page_size in [RECEIPTS_PER_PAGE, STATEMENT_ROWS_PER_PAGE] {
            for len in [0, 1, 7, 8, 9, 25, 26, 27, 52, 53, 100] {
                let items: Vec<usize> = (0..len).collect();
                let pages = paginate(&items, page_size);

                assert_eq!(pages.len(), page_count(len, page_size));
                assert_eq!(pages.len(), (len + page_size - 1) / page_size);

                let joined: Vec<usize> = pages.iter().flat_map(|p| p.items.iter().copied()).collect();
                assert_eq!(joined, items);
                for page in &pages {
                    assert_eq!(page.items.first().copied(), Some(page.offset));
                }
            }
        }
    }

    #[test]
    fn nine_receipts_fill_two_sheets() {
        let items: Vec<u32> = (1..=9).collect();
        let pages = paginate(&items, RECEIPTS_PER_PAGE);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].items.len(), 8);
        assert_eq!(pages[1].items, &[9]);
        assert!(pages[0].is_first && !pages[0].is_last);
        assert!(!pages[1].is_first && pages[1].is_last);
    }

    #[test]
    fn single_page_is_first_and_last() {
        let pages = paginate(&["only"], STATEMENT_ROWS_PER_PAGE);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_first && pages[0].is_last);
    }

    #[test]
    fn empty_list_has_no_pages() {
        let items: Vec<u8> = Vec::new();
        assert!(paginate(&items, STATEMENT_ROWS_PER_PAGE).is_empty());
        assert!(paginate(&items, RECEIPTS_PER_PAGE).is_empty());
    }
}
