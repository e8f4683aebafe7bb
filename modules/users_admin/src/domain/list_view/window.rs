use serde::{Deserialize, Serialize};

/// The single slicing rule used by every state change:
/// `items[page_index * page_size .. (page_index + 1) * page_size]`, clamped.
pub fn slice<T>(items: &[T], page_index: usize, page_size: usize) -> &[T] {
    let start = page_index.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Request from the pager control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEvent {
    pub page_index: usize,
    pub page_size: usize,
}

/// Current page index and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub index: usize,
    pub size: usize,
}

impl PageWindow {
    pub fn new(size: usize) -> Self {
        Self { index: 0, size }
    }

    /// A new size restarts at page 0; the same size moves to the requested page.
    pub fn apply(&mut self, event: PageEvent) {
        if event.page_size != self.size {
            self.size = event.page_size;
            self.index = 0;
        } else {
            self.index = event.page_index;
        }
    }

    pub fn first_page(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_length_matches_remaining_items() {
        let items: Vec<u32> = (0..23).collect();
        for size in [5, 10, 25, 50] {
            let mut index = 0;
            while index * size < items.len() {
                let page = slice(&items, index, size);
                assert_eq!(page.len(), size.min(items.len() - index * size));
                assert_eq!(page.first(), Some(&((index * size) as u32)));
                index += 1;
            }
            assert!(slice(&items, index, size).is_empty());
        }
    }

    #[test]
    fn slice_handles_degenerate_inputs() {
        let items = [1, 2, 3];
        assert!(slice(&items, 0, 0).is_empty());
        assert!(slice(&items, usize::MAX, 5).is_empty());
        assert!(slice::<u8>(&[], 0, 5).is_empty());
    }

    #[test]
    fn size_change_resets_index() {
        let mut w = PageWindow::new(5);
        w.apply(PageEvent {
            page_index: 3,
            page_size: 5,
        });
        assert_eq!(w, PageWindow { index: 3, size: 5 });

        w.apply(PageEvent {
            page_index: 2,
            page_size: 10,
        });
        assert_eq!(w, PageWindow { index: 0, size: 10 });
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(6, 0), 0);
    }
}
