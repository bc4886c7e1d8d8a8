use serde::Serialize;

/// One page of an ordered ledger plus the numbers needed to render navigation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, already clamped into `1..=total_pages`.
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Slices `items` into fixed-size pages.
///
/// `page` is clamped into range and a `page_size` of zero behaves like one.
/// An empty input still reports a single empty page.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let current_page = page.clamp(1, total_pages);
    let offset = (current_page - 1) * page_size;
    let end = (offset + page_size).min(total_items);
    Page {
        items: items.get(offset..end).map(<[T]>::to_vec).unwrap_or_default(),
        current_page,
        total_pages,
        total_items,
    }
}
