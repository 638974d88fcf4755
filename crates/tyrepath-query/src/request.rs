//! Raw search parameters as a caller supplies them.
//!
//! Every field is optional text so that the HTTP layer can deserialize any
//! query string, leaving numeric validation to [`PageRequest::parse`].

use serde::Deserialize;
use tyrepath_core::{Column, Result, SearchConfig};

use crate::filter::SearchFilter;
use crate::page::PageRequest;

/// Untyped search parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    /// Free-text query.
    pub q: Option<String>,
    pub group_type: Option<String>,
    pub listing_type: Option<String>,
    /// Brand identifier; `"0"` means unset.
    pub brand: Option<String>,
    /// Model identifier; `"0"` means unset.
    pub model: Option<String>,
    /// Model year; `"0"` means unset.
    pub year: Option<String>,
    pub version: Option<String>,
    pub season: Option<String>,
    pub usage: Option<String>,
    pub service: Option<String>,
    pub position: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl SearchRequest {
    /// Request with only a free-text query.
    pub fn query(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }

    /// Set the page window.
    pub fn with_page(mut self, limit: impl ToString, offset: impl ToString) -> Self {
        self.limit = Some(limit.to_string());
        self.offset = Some(offset.to_string());
        self
    }

    /// Compose the filter these parameters describe.
    pub fn filter(&self) -> SearchFilter {
        SearchFilter::new()
            .text(self.q.as_deref())
            .equals(Column::GroupType, self.group_type.as_deref())
            .equals(Column::ListingType, self.listing_type.as_deref())
            .identifier(Column::Brand, self.brand.as_deref())
            .identifier(Column::Model, self.model.as_deref())
            .identifier(Column::Year, self.year.as_deref())
            .equals(Column::Version, self.version.as_deref())
            .equals(Column::Season, self.season.as_deref())
            .equals(Column::Usage, self.usage.as_deref())
            .equals(Column::Service, self.service.as_deref())
            .equals(Column::Position, self.position.as_deref())
    }

    /// Validate and clamp the page window.
    pub fn page(&self, config: &SearchConfig) -> Result<PageRequest> {
        PageRequest::parse(self.limit.as_deref(), self.offset.as_deref(), config)
    }
}
