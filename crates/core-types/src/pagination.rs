use serde::{Deserialize, Serialize};

/// Pagination metadata returned next to a listed page of messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// Builds the metadata for an already normalized page request.
    /// `page_size` must be positive.
    pub fn new(page: i64, page_size: i64, total: i64) -> Self {
        Self {
            page,
            page_size,
            total,
            total_pages: total_pages(total, page_size),
        }
    }
}

/// `ceil(total / page_size)`, and zero for an empty store.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 || page_size <= 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(2, 1), 2);
    }

    #[test]
    fn empty_store_has_no_pages() {
        let meta = Pagination::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.page, 1);
    }
}
