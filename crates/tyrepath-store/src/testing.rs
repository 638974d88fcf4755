//! Fixture helpers for building throwaway stores in tests.
//!
//! Enabled with the `test-utils` feature.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tyrepath_core::{Column, LoaderConfig, StoreConfig, TyrePathRecord};

use crate::loader::{LoadReport, Loader};

/// A source row with sensible defaults, built field by field.
#[derive(Debug, Clone)]
pub struct FixtureRow {
    fields: Vec<String>,
}

impl FixtureRow {
    /// Full-width row with id `id` and every other field empty.
    pub fn new(id: i64) -> Self {
        let mut fields = vec![String::new(); Column::COUNT];
        fields[Column::Id.position()] = id.to_string();
        fields[Column::Brand.position()] = "0".to_string();
        fields[Column::Model.position()] = "0".to_string();
        Self { fields }
    }

    /// Full-width row carrying every field of `record`.
    pub fn from_record(record: &TyrePathRecord) -> Self {
        let fields = Column::ALL
            .iter()
            .map(|column| match record.text(*column) {
                Some(text) => text.to_string(),
                None => record.id.to_string(),
            })
            .collect();
        Self { fields }
    }

    /// Set the value at `column`.
    pub fn set(mut self, column: Column, value: impl Into<String>) -> Self {
        self.fields[column.position()] = value.into();
        self
    }

    pub fn link(self, value: impl Into<String>) -> Self {
        self.set(Column::CategoryLink, value)
    }

    pub fn group_type(self, value: impl Into<String>) -> Self {
        self.set(Column::GroupType, value)
    }

    pub fn listing_type(self, value: impl Into<String>) -> Self {
        self.set(Column::ListingType, value)
    }

    pub fn brand(self, value: impl Into<String>) -> Self {
        self.set(Column::Brand, value)
    }

    pub fn model(self, value: impl Into<String>) -> Self {
        self.set(Column::Model, value)
    }

    pub fn year(self, value: impl Into<String>) -> Self {
        self.set(Column::Year, value)
    }

    pub fn title(self, value: impl Into<String>) -> Self {
        self.set(Column::SeoTitle, value)
    }

    pub fn keyword(self, value: impl Into<String>) -> Self {
        self.set(Column::SeoKeyword, value)
    }

    /// Cut the row down to its first `len` fields.
    pub fn truncated(mut self, len: usize) -> Self {
        self.fields.truncate(len);
        self
    }

    /// The row's fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// Write `rows` below a header line to `path`.
pub fn write_source(path: &Path, rows: &[FixtureRow]) {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .expect("create fixture source");
    let header: Vec<&str> = Column::ALL.iter().map(|c| c.name()).collect();
    writer.write_record(&header).expect("write fixture header");
    for row in rows {
        writer.write_record(row.fields()).expect("write fixture row");
    }
    writer.flush().expect("flush fixture source");
}

/// A loaded store living in a temporary directory.
pub struct FixtureStore {
    /// Keeps the directory alive for the store's lifetime.
    pub dir: TempDir,
    /// Config pointing at the loaded store.
    pub store: StoreConfig,
    /// What the loader reported.
    pub report: LoadReport,
}

impl FixtureStore {
    /// Load `rows` into a fresh store.
    pub async fn load(rows: &[FixtureRow]) -> Self {
        let dir = tempfile::tempdir().expect("create fixture dir");
        let source = dir.path().join("source.csv");
        write_source(&source, rows);

        let store = StoreConfig::at(dir.path().join("tyre_paths.db"));
        let loader = Loader::new(
            store.clone(),
            LoaderConfig {
                source,
                batch_size: 64,
                ..Default::default()
            },
        )
        .expect("fixture loader config");
        let report = loader.run().await.expect("load fixture store");

        Self { dir, store, report }
    }

    /// Config for a store path inside the fixture directory that does not exist.
    pub fn missing_store(&self) -> StoreConfig {
        StoreConfig::at(self.dir.path().join("missing.db"))
    }

    /// Path of the loaded store.
    pub fn path(&self) -> PathBuf {
        self.store.path.clone()
    }
}

/// Three rows: the documented scenario row plus two siblings, with group
/// types `Consumer`, empty, `Consumer`.
pub fn sample_rows() -> Vec<FixtureRow> {
    vec![
        FixtureRow::new(1)
            .link("/test-path")
            .set(Column::Group, "Group")
            .group_type("Consumer")
            .listing_type("Online")
            .brand("5")
            .model("10")
            .year("2024")
            .title("Test Title")
            .set(Column::SeoDescription, "Test Desc")
            .keyword("test,kw"),
        FixtureRow::new(2)
            .link("/lastik/yaz")
            .listing_type("Store")
            .brand("7")
            .year("2023")
            .title("Summer Tyres"),
        FixtureRow::new(3)
            .link("/lastik/kis")
            .group_type("Consumer")
            .brand("5")
            .model("11")
            .year("2023")
            .title("Winter Tyres")
            .keyword("snow"),
    ]
}
