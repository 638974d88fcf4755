//! Table and index definitions for the catalog store.
//!
//! DDL is generated from [`Column::ALL`] so the table layout and the loader's
//! positional mapping cannot drift apart.

use sqlx::SqliteConnection;
use tyrepath_core::{Column, Error, Result, TABLE_NAME};

/// Secondary indexes, built once after the bulk insert.
pub const INDEXES: [(&str, Column); 7] = [
    ("idx_category_link", Column::CategoryLink),
    ("idx_seo_title", Column::SeoTitle),
    ("idx_group_type", Column::GroupType),
    ("idx_listing_type", Column::ListingType),
    ("idx_brand", Column::Brand),
    ("idx_model", Column::Model),
    ("idx_year", Column::Year),
];

/// `CREATE TABLE` statement for the catalog table.
pub fn create_table_sql() -> String {
    let columns: Vec<String> = Column::ALL
        .iter()
        .map(|column| match column {
            Column::Id => format!("{} INTEGER PRIMARY KEY", column.name()),
            other => format!("{} TEXT", other.name()),
        })
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {TABLE_NAME} (\n    {}\n)",
        columns.join(",\n    ")
    )
}

/// `CREATE INDEX` statement for one secondary index.
pub fn create_index_sql(name: &str, column: Column) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS {name} ON {TABLE_NAME}({})",
        column.name()
    )
}

/// Leading part of a multi-row insert; the `VALUES` tuples are appended by
/// the caller.
pub fn insert_prefix() -> String {
    let names: Vec<&str> = Column::ALL.iter().map(|c| c.name()).collect();
    format!("INSERT INTO {TABLE_NAME} ({}) ", names.join(", "))
}

/// Create the catalog table.
pub async fn create_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(&create_table_sql())
        .execute(&mut *conn)
        .await
        .map_err(Error::database)?;
    Ok(())
}

/// Create every secondary index in [`INDEXES`].
pub async fn create_indexes(conn: &mut SqliteConnection) -> Result<()> {
    for (name, column) in INDEXES {
        log::debug!("Creating index {name} on {}", column.name());
        sqlx::query(&create_index_sql(name, column))
            .execute(&mut *conn)
            .await
            .map_err(Error::database)?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
