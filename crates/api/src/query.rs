//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;

/// Default page size for paginated listings.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size a client may request.
const MAX_LIMIT: i64 = 200;

/// Query parameters for admin listings (`?year=&status=&limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct AdminListParams {
    pub year: Option<i32>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl AdminListParams {
    /// Effective limit, clamped to `1..=200`.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Effective offset, clamped to non-negative.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Query parameters for endpoints scoped to an exhibition year (`?year=`).
///
/// When absent, handlers fall back to the configured edition year.
#[derive(Debug, Deserialize)]
pub struct YearParams {
    pub year: Option<i32>,
}
