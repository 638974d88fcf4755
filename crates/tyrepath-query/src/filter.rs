//! Composable search filter.
//!
//! A [`SearchFilter`] is an ordered list of typed [`FilterClause`]s. Builder
//! methods apply the "unset" rules as clauses are added, so a filter only ever
//! holds constraints that actually narrow the result set. At query time the
//! clauses are folded into a single `WHERE ... AND ...` with every value bound
//! as a parameter. An empty filter adds no `WHERE` at all and matches every
//! record.
//!
//! # Collation
//!
//! Text search uses SQLite `LIKE`, which is case-insensitive for ASCII
//! letters only. `%`, `_` and `\` in the needle are escaped, so the needle is
//! always matched as a literal substring. SQLite caps a `LIKE` pattern at
//! [`MAX_LIKE_PATTERN_BYTES`]; longer needles are rejected by
//! [`SearchFilter::validate`] rather than sent to the store.

use sqlx::{QueryBuilder, Sqlite};
use tyrepath_core::{Column, Error, Result, is_unset_identifier};

/// Columns searched by free-text queries.
pub const TEXT_SEARCH_COLUMNS: [Column; 3] =
    [Column::CategoryLink, Column::SeoTitle, Column::SeoKeyword];

/// Escape character used in `LIKE ... ESCAPE` clauses.
const LIKE_ESCAPE: char = '\\';

/// Longest `LIKE` pattern SQLite accepts by default, in bytes.
pub const MAX_LIKE_PATTERN_BYTES: usize = 50_000;

/// One constraint on the record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterClause {
    /// Substring match on any of [`TEXT_SEARCH_COLUMNS`].
    Contains(String),

    /// Exact equality on one column.
    Equals { column: Column, value: String },
}

/// Conjunction of filter clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    clauses: Vec<FilterClause>,
}

impl SearchFilter {
    /// A filter that matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a free-text constraint.
    ///
    /// The query is trimmed; nothing is added if it is then empty.
    pub fn text(mut self, query: Option<&str>) -> Self {
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            self.clauses.push(FilterClause::Contains(q.to_string()));
        }
        self
    }

    /// Add an exact-match constraint unless `value` is absent or empty.
    pub fn equals(mut self, column: Column, value: Option<&str>) -> Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.clauses.push(FilterClause::Equals {
                column,
                value: v.to_string(),
            });
        }
        self
    }

    /// Add an exact-match constraint on an identifier-like column.
    ///
    /// Besides absent and empty, the reserved `"0"` also means "unset".
    pub fn identifier(self, column: Column, value: Option<&str>) -> Self {
        match value {
            Some(v) if is_unset_identifier(v) => self,
            other => self.equals(column, other),
        }
    }

    /// The active clauses, in the order they were added.
    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// True when the filter matches every record.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Check that every clause can be evaluated by the store.
    ///
    /// Fails with an invalid `q` parameter when the escaped text pattern,
    /// wildcards included, exceeds [`MAX_LIKE_PATTERN_BYTES`].
    pub fn validate(&self) -> Result<()> {
        for clause in &self.clauses {
            if let FilterClause::Contains(needle) = clause
                && like_pattern(needle).len() > MAX_LIKE_PATTERN_BYTES
            {
                return Err(Error::invalid_parameter(
                    "q",
                    format!("must be at most {MAX_LIKE_PATTERN_BYTES} bytes once escaped"),
                ));
            }
        }
        Ok(())
    }

    /// Append this filter's `WHERE` clause, if any, to `qb`.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        for (i, clause) in self.clauses.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            match clause {
                FilterClause::Contains(needle) => {
                    let pattern = like_pattern(needle);
                    qb.push("(");
                    for (j, column) in TEXT_SEARCH_COLUMNS.iter().enumerate() {
                        if j > 0 {
                            qb.push(" OR ");
                        }
                        qb.push(column.name())
                            .push(" LIKE ")
                            .push_bind(pattern.clone())
                            .push(format!(" ESCAPE '{LIKE_ESCAPE}'"));
                    }
                    qb.push(")");
                }
                FilterClause::Equals { column, value } => {
                    qb.push(column.name()).push(" = ").push_bind(value.clone());
                }
            }
        }
    }
}

fn like_pattern(needle: &str) -> String {
    format!("%{}%", escape_like(needle))
}

/// Escape `LIKE` metacharacters so `needle` matches literally.
pub fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

// ============================================================================
// Tests
// ============================================================================
