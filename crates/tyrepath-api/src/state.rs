//! Shared handler state.
//!
//! [`ApiState`] holds the search service behind an `Arc`, so cloning it into
//! each request is cheap and every handler sees the same connection pool.

use std::sync::Arc;

use tyrepath_core::{Result, SearchConfig, StoreConfig};
use tyrepath_query::CatalogSearch;
use tyrepath_store::Catalog;

/// Thread-safe state shared by every handler.
#[derive(Clone, Debug)]
pub struct ApiState {
    search: Arc<CatalogSearch>,
}

impl ApiState {
    /// Wrap an existing search service.
    pub fn new(search: CatalogSearch) -> Self {
        Self {
            search: Arc::new(search),
        }
    }

    /// Build state from configuration sections.
    ///
    /// The store is not touched here; a missing store surfaces per request.
    pub fn from_config(store: &StoreConfig, search: SearchConfig) -> Result<Self> {
        let catalog = Catalog::open(store);
        Ok(Self::new(CatalogSearch::new(catalog, search)?))
    }

    /// The search service.
    pub fn search(&self) -> &CatalogSearch {
        &self.search
    }
}
