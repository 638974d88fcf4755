//! Filtered, paginated search over the Tyrepath catalog.
//!
//! # Modules
//!
//! - [`filter`]: typed filter clauses folded into one `WHERE` clause
//! - [`page`]: `limit`/`offset` parsing and clamping
//! - [`request`]: raw search parameters
//! - [`service`]: [`CatalogSearch`], the search/stats/brands service
//! - [`types`]: response shapes

pub mod filter;
pub mod page;
pub mod request;
pub mod service;
pub mod types;

pub use filter::{FilterClause, MAX_LIKE_PATTERN_BYTES, SearchFilter, TEXT_SEARCH_COLUMNS};
pub use page::PageRequest;
pub use request::SearchRequest;
pub use service::CatalogSearch;
pub use types::{BrandCount, CatalogStats, SearchHit, SearchPage, UNDEFINED_GROUP_TYPE, public_url};
