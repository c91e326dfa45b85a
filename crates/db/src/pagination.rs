//! Range pagination helpers shared by list queries.

use tracareer_core::application::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`, defaulting when absent.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Clamp a requested page index to be non-negative.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(0).max(0)
}

/// Row offset of the first record on `page`.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    page.saturating_mul(limit)
}
