//! The catalog search service.
//!
//! [`CatalogSearch`] answers search, stats and brands requests against a
//! read-only [`Catalog`]. Each request acquires one pooled connection, runs
//! all of its queries on it, and releases it when the connection drops.

use std::collections::BTreeMap;

use sqlx::{QueryBuilder, Sqlite};
use tyrepath_core::{Column, Error, Result, SearchConfig, TABLE_NAME, UNSET_IDENTIFIER};
use tyrepath_store::Catalog;

use crate::filter::SearchFilter;
use crate::page::PageRequest;
use crate::request::SearchRequest;
use crate::types::{
    BrandCount, CatalogStats, HIT_COLUMNS, HitRow, SearchHit, SearchPage, UNDEFINED_GROUP_TYPE,
};

/// Search, stats and brand aggregation over the catalog store.
#[derive(Clone, Debug)]
pub struct CatalogSearch {
    catalog: Catalog,
    config: SearchConfig,
}

impl CatalogSearch {
    /// Create a service over `catalog`.
    pub fn new(catalog: Catalog, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run a search from raw request parameters.
    ///
    /// The page window is validated before any connection is acquired, so an
    /// invalid `limit` or `offset` never touches the store.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        let page = request.page(&self.config)?;
        self.search_filtered(&request.filter(), page).await
    }

    /// Run a search with an already composed filter and window.
    pub async fn search_filtered(
        &self,
        filter: &SearchFilter,
        page: PageRequest,
    ) -> Result<SearchPage> {
        filter.validate()?;
        let mut conn = self.catalog.acquire().await?;

        let mut count =
            QueryBuilder::<Sqlite>::new(format!("SELECT COUNT(*) FROM {TABLE_NAME}"));
        filter.push_where(&mut count);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&mut *conn)
            .await
            .map_err(Error::database)?;

        let mut select = QueryBuilder::<Sqlite>::new("SELECT ");
        for (i, column) in HIT_COLUMNS.iter().enumerate() {
            if i > 0 {
                select.push(", ");
            }
            select.push(column.name());
        }
        select.push(" FROM ").push(TABLE_NAME);
        filter.push_where(&mut select);
        select
            .push(" ORDER BY ")
            .push(Column::Id.name())
            .push(" LIMIT ")
            .push_bind(i64::from(page.limit))
            .push(" OFFSET ")
            .push_bind(page.offset_i64());

        let rows: Vec<HitRow> = select
            .build_query_as()
            .fetch_all(&mut *conn)
            .await
            .map_err(Error::database)?;

        log::debug!(
            "search matched {} records, returning {} (limit {}, offset {})",
            total,
            rows.len(),
            page.limit,
            page.offset
        );

        let origin = self.config.site_origin.as_str();
        Ok(SearchPage {
            total: to_count(total),
            limit: page.limit,
            offset: page.offset,
            results: rows
                .into_iter()
                .map(|row| SearchHit::from_row(row, origin))
                .collect(),
        })
    }

    /// Count records overall, per group type and per listing type.
    pub async fn stats(&self) -> Result<CatalogStats> {
        let mut conn = self.catalog.acquire().await?;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {TABLE_NAME}"))
            .fetch_one(&mut *conn)
            .await
            .map_err(Error::database)?;

        let group_sql = format!(
            "SELECT CASE WHEN {col} IS NULL OR {col} = '' THEN '{UNDEFINED_GROUP_TYPE}' \
             ELSE {col} END AS bucket, COUNT(*) FROM {TABLE_NAME} GROUP BY bucket",
            col = Column::GroupType.name()
        );
        let groups: Vec<(String, i64)> = sqlx::query_as(&group_sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(Error::database)?;

        let listing_sql = format!(
            "SELECT {col}, COUNT(*) FROM {TABLE_NAME} WHERE {col} != '' GROUP BY {col}",
            col = Column::ListingType.name()
        );
        let listings: Vec<(String, i64)> = sqlx::query_as(&listing_sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(Error::database)?;

        Ok(CatalogStats {
            total: to_count(total),
            group_types: into_counts(groups),
            listing_types: into_counts(listings),
        })
    }

    /// The most common brand identifiers, most frequent first.
    ///
    /// Unset brands (`""` and `"0"`) are excluded. Ties are ordered by brand
    /// identifier.
    pub async fn brands(&self) -> Result<Vec<BrandCount>> {
        let mut conn = self.catalog.acquire().await?;

        let sql = format!(
            "SELECT {col}, COUNT(*) AS hits FROM {TABLE_NAME} \
             WHERE {col} != '' AND {col} != ? \
             GROUP BY {col} ORDER BY hits DESC, {col} ASC LIMIT ?",
            col = Column::Brand.name()
        );
        let rows: Vec<(String, i64)> = sqlx::query_as(&sql)
            .bind(UNSET_IDENTIFIER)
            .bind(i64::from(self.config.brand_limit))
            .fetch_all(&mut *conn)
            .await
            .map_err(Error::database)?;

        Ok(rows
            .into_iter()
            .map(|(id, count)| BrandCount {
                id,
                count: to_count(count),
            })
            .collect())
    }
}

fn to_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

fn into_counts(rows: Vec<(String, i64)>) -> BTreeMap<String, u64> {
    rows.into_iter()
        .map(|(key, n)| (key, to_count(n)))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
