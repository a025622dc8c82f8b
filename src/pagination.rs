use serde::{Deserialize, Serialize};

/// Number of rows returned when the caller does not ask for a specific window.
pub const DEFAULT_LIMIT: usize = 100;

/// Offset/limit window applied to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Number of rows to skip.
    pub offset: usize,
    /// Maximum number of rows to return.
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Window starting at `offset` returning at most `limit` rows.
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Window for a 1-based `page` of `per_page` rows. Page `0` is treated as page `1`.
    pub fn page(page: usize, per_page: usize) -> Self {
        Self {
            offset: (page.max(1) - 1).saturating_mul(per_page),
            limit: per_page,
        }
    }

    pub(crate) fn offset_i64(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }

    pub(crate) fn limit_i64(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_matches_skip_zero_limit_hundred() {
        assert_eq!(Pagination::default(), Pagination::new(0, 100));
    }

    #[test]
    fn page_converts_to_offset() {
        assert_eq!(Pagination::page(1, 20), Pagination::new(0, 20));
        assert_eq!(Pagination::page(3, 20), Pagination::new(40, 20));
        assert_eq!(Pagination::page(0, 20), Pagination::new(0, 20));
    }

    #[test]
    fn page_offset_saturates_instead_of_overflowing() {
        let pagination = Pagination::page(usize::MAX, usize::MAX);
        assert_eq!(pagination.offset, usize::MAX);
        assert_eq!(pagination.offset_i64(), i64::MAX);
    }

    #[test]
    fn oversized_values_saturate() {
        let pagination = Pagination::new(usize::MAX, usize::MAX);
        assert_eq!(pagination.offset_i64(), i64::MAX);
        assert_eq!(pagination.limit_i64(), i64::MAX);
    }
}
