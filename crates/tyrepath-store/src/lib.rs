//! SQLite store for the Tyrepath catalog.
//!
//! The write side is the one-shot [`Loader`]; the read side is [`Catalog`],
//! a lazily-connected read-only pool shared by the search service.
//!
//! # Features
//!
//! - `test-utils`: fixture helpers for loading throwaway stores in tests

pub mod catalog;
pub mod loader;
pub mod schema;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use catalog::{Catalog, CatalogConnection};
pub use loader::{LoadReport, Loader, RowRejection, map_row};
