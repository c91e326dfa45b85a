//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Page-number pagination (`?page=&page_size=`), 0-based.
///
/// Values are clamped via `clamp_page` / `clamp_limit` before reaching the
/// repository.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}
