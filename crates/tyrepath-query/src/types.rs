//! Result shapes returned by the search service.
//!
//! Field names serialize in camelCase; these structs are the JSON contract
//! of the HTTP API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tyrepath_core::Column;

/// Label used for records whose group type is empty.
pub const UNDEFINED_GROUP_TYPE: &str = "Undefined";

/// Columns fetched for a search hit, in select order.
pub(crate) const HIT_COLUMNS: [Column; 15] = [
    Column::Id,
    Column::CategoryLink,
    Column::Group,
    Column::GroupType,
    Column::ListingType,
    Column::Brand,
    Column::Model,
    Column::Year,
    Column::Version,
    Column::Season,
    Column::Usage,
    Column::Service,
    Column::Position,
    Column::SeoTitle,
    Column::SeoDescription,
];

/// A stored row as fetched for a search hit.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct HitRow {
    pub id: i64,
    pub tyre_category_link: String,
    pub tyre_group: String,
    pub tyre_group_type: String,
    pub tyre_listing_type: String,
    pub tyre_brand: String,
    pub tyre_model: String,
    pub tyre_year: String,
    pub tyre_version: String,
    pub tyre_season: String,
    pub tyre_usage: String,
    pub tyre_service: String,
    pub tyre_position: String,
    pub seo_title: String,
    pub seo_description: String,
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: i64,
    /// The category link as stored.
    pub path: String,
    /// Public URL of the category page.
    pub url: String,
    pub group: String,
    pub group_type: String,
    pub listing_type: String,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub version: String,
    pub season: String,
    pub usage: String,
    pub service: String,
    pub position: String,
    pub title: String,
    pub description: String,
}

impl SearchHit {
    pub(crate) fn from_row(row: HitRow, site_origin: &str) -> Self {
        Self {
            id: row.id,
            url: public_url(site_origin, &row.tyre_category_link),
            path: row.tyre_category_link,
            group: row.tyre_group,
            group_type: row.tyre_group_type,
            listing_type: row.tyre_listing_type,
            brand: row.tyre_brand,
            model: row.tyre_model,
            year: row.tyre_year,
            version: row.tyre_version,
            season: row.tyre_season,
            usage: row.tyre_usage,
            service: row.tyre_service,
            position: row.tyre_position,
            title: row.seo_title,
            description: row.seo_description,
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Records matching the filter, ignoring the page window.
    pub total: u64,
    /// Effective page size after clamping.
    pub limit: u32,
    pub offset: u64,
    pub results: Vec<SearchHit>,
}

/// Catalog-wide counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total: u64,
    /// Records per group type, empty values under [`UNDEFINED_GROUP_TYPE`].
    pub group_types: BTreeMap<String, u64>,
    /// Records per non-empty listing type.
    pub listing_types: BTreeMap<String, u64>,
}

/// A brand identifier and how many records carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandCount {
    pub id: String,
    pub count: u64,
}

/// Join a site origin and a category link with exactly one slash.
pub fn public_url(site_origin: &str, link: &str) -> String {
    format!(
        "{}/{}",
        site_origin.trim_end_matches('/'),
        link.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_single_slash() {
        let origin = "https://www.bridgestone.com.tr";
        assert_eq!(
            public_url(origin, "/test-path"),
            "https://www.bridgestone.com.tr/test-path"
        );
        assert_eq!(
            public_url("https://example.com/", "lastik/yaz"),
            "https://example.com/lastik/yaz"
        );
    }

    #[test]
    fn test_hit_columns_match_row_fields() {
        let names: Vec<&str> = HIT_COLUMNS.iter().map(|c| c.name()).collect();
        assert_eq!(names[0], "id");
        assert_eq!(names[1], "tyre_category_link");
        assert_eq!(names[14], "seo_description");
        assert!(!names.contains(&"seo_keyword"));
    }

    #[test]
    fn test_hit_serializes_camel_case() {
        let row = HitRow {
            id: 1,
            tyre_category_link: "/a".into(),
            tyre_group: "G".into(),
            tyre_group_type: "Consumer".into(),
            tyre_listing_type: "Online".into(),
            tyre_brand: "5".into(),
            tyre_model: "10".into(),
            tyre_year: "2024".into(),
            tyre_version: "V1".into(),
            tyre_season: "Summer".into(),
            tyre_usage: "Car".into(),
            tyre_service: "Fit".into(),
            tyre_position: "Front".into(),
            seo_title: "T".into(),
            seo_description: "D".into(),
        };
        let hit = SearchHit::from_row(row, "https://x.test");
        let json = serde_json::to_value(&hit).unwrap();

        assert_eq!(json["groupType"], "Consumer");
        assert_eq!(json["listingType"], "Online");
        assert_eq!(json["url"], "https://x.test/a");
        assert_eq!(json["title"], "T");
        assert!(json.get("seoKeyword").is_none());
        assert_eq!(json.as_object().unwrap().len(), 16);
    }

    #[test]
    fn test_stats_serializes_camel_case() {
        let stats = CatalogStats {
            total: 3,
            group_types: BTreeMap::from([("Consumer".to_string(), 2)]),
            listing_types: BTreeMap::new(),
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["groupTypes"]["Consumer"], 2);
        assert!(json["listingTypes"].as_object().unwrap().is_empty());
    }
}
