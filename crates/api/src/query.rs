//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Page size when `limit` is omitted.
pub const DEFAULT_LIMIT: i64 = 50;

/// Upper bound on `limit`.
pub const MAX_LIMIT: i64 = 200;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// `limit` clamped to `1..=MAX_LIMIT`.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// `offset` floored at zero.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<i64>, offset: Option<i64>) -> PaginationParams {
        PaginationParams { limit, offset }
    }

    #[test]
    fn limit_uses_default_when_none() {
        assert_eq!(params(None, None).limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn limit_respects_bounds() {
        assert_eq!(params(Some(10_000), None).limit(), MAX_LIMIT);
        assert_eq!(params(Some(0), None).limit(), 1);
        assert_eq!(params(Some(25), None).limit(), 25);
    }

    #[test]
    fn offset_floors_at_zero() {
        assert_eq!(params(None, None).offset(), 0);
        assert_eq!(params(None, Some(-5)).offset(), 0);
        assert_eq!(params(None, Some(40)).offset(), 40);
    }
}
