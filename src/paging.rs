//! Offset pagination shared by listing operations.

use serde::Deserialize;

/// Upper bound applied to any requested page size.
const MAX_LIMIT: usize = 200;

/// Offset/limit window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Page {
    /// Number of leading rows to skip.
    #[serde(default)]
    pub skip: usize,
    /// Maximum number of rows to return.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

const fn default_limit() -> usize {
    20
}

impl Page {
    /// Creates a page window, clamping the limit to the supported maximum.
    #[must_use]
    pub const fn new(skip: usize, limit: usize) -> Self {
        let bounded = if limit > MAX_LIMIT { MAX_LIMIT } else { limit };
        Self {
            skip,
            limit: bounded,
        }
    }

    /// Returns the limit after clamping.
    #[must_use]
    pub const fn bounded_limit(self) -> usize {
        if self.limit > MAX_LIMIT {
            MAX_LIMIT
        } else {
            self.limit
        }
    }

    /// Applies the window to an already ordered collection.
    #[must_use]
    pub fn apply<T>(self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.skip)
            .take(self.bounded_limit())
            .collect()
    }

    /// Returns `skip` as a SQL offset.
    #[must_use]
    pub fn offset_i64(self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    /// Returns the bounded limit as a SQL limit.
    #[must_use]
    pub fn limit_i64(self) -> i64 {
        i64::try_from(self.bounded_limit()).unwrap_or(i64::MAX)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, default_limit())
    }
}
