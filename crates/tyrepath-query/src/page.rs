//! Page window parsing.
//!
//! `limit` and `offset` arrive as untyped text and are validated here:
//! absent or blank values take the configured defaults, anything else must be
//! a non-negative integer. `limit` is clamped to the configured maximum.

use serde::Serialize;
use tyrepath_core::{Error, Result, SearchConfig};

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    /// Maximum rows to return, already clamped.
    pub limit: u32,
    /// Matching rows to skip.
    pub offset: u64,
}

impl PageRequest {
    /// Build a window from numeric values, clamping `limit`.
    pub fn new(limit: u64, offset: u64, config: &SearchConfig) -> Self {
        let clamped = limit.min(u64::from(config.max_limit));
        Self {
            limit: u32::try_from(clamped).unwrap_or(config.max_limit),
            offset,
        }
    }

    /// Parse a window from raw request text.
    pub fn parse(limit: Option<&str>, offset: Option<&str>, config: &SearchConfig) -> Result<Self> {
        let limit = parse_count("limit", limit)?.unwrap_or(u64::from(config.default_limit));
        let offset = parse_count("offset", offset)?.unwrap_or(0);
        if i64::try_from(offset).is_err() {
            return Err(Error::invalid_parameter("offset", "value is too large"));
        }
        Ok(Self::new(limit, offset, config))
    }

    /// Offset as the signed integer SQLite binds.
    pub(crate) fn offset_i64(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }
}

/// Parse an optional non-negative integer; blank counts as absent.
fn parse_count(name: &str, raw: Option<&str>) -> Result<Option<u64>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(text) => text.parse::<u64>().map(Some).map_err(|_| {
            Error::invalid_parameter(name, format!("expected a non-negative integer, got '{text}'"))
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================
