//! Splits listings into numbered pages for index, archive and tag pages.

/// One page of a paginated listing. Page numbers start at 1.
#[derive(Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub total: usize,
}

impl<T> Page<T> {
    /// The number of the previous page, if any.
    pub fn prev(&self) -> Option<usize> {
        if self.number > 1 {
            Some(self.number - 1)
        } else {
            None
        }
    }

    /// The number of the next page, if any.
    pub fn next(&self) -> Option<usize> {
        if self.number < self.total {
            Some(self.number + 1)
        } else {
            None
        }
    }
}

/// Chunks `items` into pages of at most `page_size` items, preserving order.
/// A `page_size` of 0 is treated as 1. No items means no pages.
pub fn paginate<T: Clone>(items: &[T], page_size: usize) -> Vec<Page<T>> {
    let page_size = std::cmp::max(page_size, 1);
    let total = (items.len() + page_size - 1) / page_size;
    items
        .chunks(page_size)
        .enumerate()
        .map(|(i, chunk)| Page {
            items: chunk.to_vec(),
            number: i + 1,
            total,
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_paginate() {
        let pages = paginate(&[1, 2, 3, 4, 5], 2);
        assert_eq!(3, pages.len());
        assert_eq!(vec![1, 2], pages[0].items);
        assert_eq!(vec![5], pages[2].items);
        assert!(pages.iter().all(|p| p.total == 3));

        assert_eq!(None, pages[0].prev());
        assert_eq!(Some(2), pages[0].next());
        assert_eq!(Some(2), pages[2].prev());
        assert_eq!(None, pages[2].next());
    }

    #[test]
    fn test_paginate_exact_fit() {
        let pages = paginate(&["a", "b", "c", "d"], 4);
        assert_eq!(1, pages.len());
        assert_eq!(None, pages[0].prev());
        assert_eq!(None, pages[0].next());
    }

    #[test]
    fn test_paginate_empty() {
        assert!(paginate::<u8>(&[], 4).is_empty());
    }

    #[test]
    fn test_paginate_zero_page_size() {
        let pages = paginate(&[1, 2], 0);
        assert_eq!(2, pages.len());
        assert_eq!(vec![2], pages[1].items);
    }
}
