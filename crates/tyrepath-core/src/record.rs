//! The tyre catalog path record and its on-disk column layout.
//!
//! [`Column`] enumerates the stored columns in source-file order, so a
//! column's discriminant is also its position in a source row. Column names
//! are part of the persisted store contract and must not change.

use serde::{Deserialize, Serialize};

/// Name of the single table holding catalog records.
pub const TABLE_NAME: &str = "tyre_paths";

/// Identifier value reserved to mean "not set" for brand and model.
pub const UNSET_IDENTIFIER: &str = "0";

/// True when an identifier-like value carries no information.
///
/// Both the empty string and [`UNSET_IDENTIFIER`] count as unset.
pub fn is_unset_identifier(value: &str) -> bool {
    value.is_empty() || value == UNSET_IDENTIFIER
}

/// A stored column, declared in source-row order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    CategoryLink,
    Group,
    GroupType,
    ListingType,
    Brand,
    Model,
    Year,
    Version,
    Season,
    Usage,
    Service,
    Position,
    SeoTitle,
    SeoDescription,
    SeoKeyword,
    SeoAbstract,
    CreatedDate,
    IsActive,
    SectionWidth,
    AspectRatio,
    RimDiameter,
    IsSeo,
}

impl Column {
    /// Every column, in source-row order.
    pub const ALL: [Column; 23] = [
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
        Column::SeoKeyword,
        Column::SeoAbstract,
        Column::CreatedDate,
        Column::IsActive,
        Column::SectionWidth,
        Column::AspectRatio,
        Column::RimDiameter,
        Column::IsSeo,
    ];

    /// Number of columns in a full source row.
    pub const COUNT: usize = Self::ALL.len();

    /// Number of leading columns every accepted row must carry.
    ///
    /// Everything from [`Column::SectionWidth`] onward is optional.
    pub const REQUIRED: usize = Column::SectionWidth as usize;

    /// Stored column name.
    pub fn name(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::CategoryLink => "tyre_category_link",
            Column::Group => "tyre_group",
            Column::GroupType => "tyre_group_type",
            Column::ListingType => "tyre_listing_type",
            Column::Brand => "tyre_brand",
            Column::Model => "tyre_model",
            Column::Year => "tyre_year",
            Column::Version => "tyre_version",
            Column::Season => "tyre_season",
            Column::Usage => "tyre_usage",
            Column::Service => "tyre_service",
            Column::Position => "tyre_position",
            Column::SeoTitle => "seo_title",
            Column::SeoDescription => "seo_description",
            Column::SeoKeyword => "seo_keyword",
            Column::SeoAbstract => "seo_abstract",
            Column::CreatedDate => "created_date",
            Column::IsActive => "is_active",
            Column::SectionWidth => "tyre_section_width",
            Column::AspectRatio => "tyre_aspect_ratio",
            Column::RimDiameter => "tyre_jant_cap",
            Column::IsSeo => "is_seo",
        }
    }

    /// Zero-based position of this column in a source row.
    pub fn position(self) -> usize {
        self as usize
    }
}

/// One tyre catalog path entry.
///
/// Records are written once by the loader and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TyrePathRecord {
    pub id: i64,
    pub category_link: String,
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
    pub seo_title: String,
    pub seo_description: String,
    pub seo_keyword: String,
    pub seo_abstract: String,
    pub created_date: String,
    pub is_active: String,
    pub section_width: String,
    pub aspect_ratio: String,
    pub rim_diameter: String,
    pub is_seo: String,
}

impl TyrePathRecord {
    /// Text value stored under `column`.
    ///
    /// Returns `None` for [`Column::Id`], the only non-text column.
    pub fn text(&self, column: Column) -> Option<&str> {
        let value = match column {
            Column::Id => return None,
            Column::CategoryLink => &self.category_link,
            Column::Group => &self.group,
            Column::GroupType => &self.group_type,
            Column::ListingType => &self.listing_type,
            Column::Brand => &self.brand,
            Column::Model => &self.model,
            Column::Year => &self.year,
            Column::Version => &self.version,
            Column::Season => &self.season,
            Column::Usage => &self.usage,
            Column::Service => &self.service,
            Column::Position => &self.position,
            Column::SeoTitle => &self.seo_title,
            Column::SeoDescription => &self.seo_description,
            Column::SeoKeyword => &self.seo_keyword,
            Column::SeoAbstract => &self.seo_abstract,
            Column::CreatedDate => &self.created_date,
            Column::IsActive => &self.is_active,
            Column::SectionWidth => &self.section_width,
            Column::AspectRatio => &self.aspect_ratio,
            Column::RimDiameter => &self.rim_diameter,
            Column::IsSeo => &self.is_seo,
        };
        Some(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_column_positions_follow_declaration_order() {
        for (i, column) in Column::ALL.iter().enumerate() {
            assert_eq!(column.position(), i);
        }
        assert_eq!(Column::COUNT, 23);
    }

    #[test]
    fn test_required_columns_end_before_dimensions() {
        assert_eq!(Column::REQUIRED, 19);
        assert_eq!(Column::ALL[Column::REQUIRED - 1], Column::IsActive);
    }

    #[test]
    fn test_column_names_unique() {
        let names: HashSet<_> = Column::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), Column::COUNT);
    }

    #[test]
    fn test_rim_diameter_keeps_legacy_name() {
        assert_eq!(Column::RimDiameter.name(), "tyre_jant_cap");
    }

    #[test]
    fn test_is_unset_identifier() {
        assert!(is_unset_identifier(""));
        assert!(is_unset_identifier("0"));
        assert!(!is_unset_identifier("00"));
        assert!(!is_unset_identifier("5"));
    }

    #[test]
    fn test_record_text_lookup() {
        let record = TyrePathRecord {
            id: 7,
            group_type: "Consumer".into(),
            rim_diameter: "16".into(),
            ..Default::default()
        };
        assert_eq!(record.text(Column::Id), None);
        assert_eq!(record.text(Column::GroupType), Some("Consumer"));
        assert_eq!(record.text(Column::RimDiameter), Some("16"));
        assert_eq!(record.text(Column::Brand), Some(""));
    }
}
