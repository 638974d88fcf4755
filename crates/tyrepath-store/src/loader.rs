//! Bulk loader: delimited export in, indexed SQLite store out.
//!
//! The loader always rebuilds from scratch. It deletes any existing store,
//! streams the source row by row, commits every `batch_size` accepted records
//! in their own transaction, and builds the secondary indexes once the data is
//! in. A failure part-way leaves the already-committed batches on disk.
//!
//! Rows that cannot be mapped are dropped, counted, and logged instead of
//! aborting the load.
//!
//! # Example
//!
//! ```rust,ignore
//! use tyrepath_core::{LoaderConfig, StoreConfig};
//! use tyrepath_store::Loader;
//!
//! let loader = Loader::new(StoreConfig::default(), LoaderConfig::default())?;
//! let report = loader.run().await?;
//! println!("{} records, {} dropped", report.inserted, report.dropped);
//! ```

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::{ConnectOptions, Connection, QueryBuilder, Sqlite, SqliteConnection};
use tokio::sync::mpsc;
use tokio::task;
use tyrepath_core::{Column, Error, LoaderConfig, Result, StoreConfig, TyrePathRecord};

use crate::schema;

/// Bind-parameter ceiling of the bundled SQLite build.
const SQLITE_MAX_BINDS: usize = 32_766;

/// Rows per `INSERT` statement, sized to stay under [`SQLITE_MAX_BINDS`].
const ROWS_PER_STATEMENT: usize = SQLITE_MAX_BINDS / Column::COUNT;

/// Parsed batches allowed to queue ahead of the writer.
const PENDING_BATCHES: usize = 2;

// ============================================================================
// Types
// ============================================================================

/// Why a source row was not loaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowRejection {
    /// The row stops before the minimum field count.
    #[error("expected at least {required} fields, found {found}")]
    TooFewFields { found: usize, required: usize },

    /// The id column is not an integer.
    #[error("id '{0}' is not an integer")]
    InvalidId(String),
}

/// Outcome of a completed load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records written to the store.
    pub inserted: u64,
    /// Source rows rejected by [`map_row`].
    pub dropped: u64,
    /// Transactions committed.
    pub batches: u64,
    /// Size of the store file after indexing, in bytes.
    pub store_bytes: u64,
}

/// One-shot catalog loader.
#[derive(Debug, Clone)]
pub struct Loader {
    store: StoreConfig,
    config: LoaderConfig,
}

// ============================================================================
// Row mapping
// ============================================================================

/// Map a source row onto a record by fixed position.
///
/// Rows shorter than `min_fields` are rejected. Fields after the required
/// core that the row does not reach default to the empty string.
pub fn map_row(
    row: &StringRecord,
    min_fields: usize,
) -> std::result::Result<TyrePathRecord, RowRejection> {
    let required = min_fields.max(Column::REQUIRED);
    if row.len() < required {
        return Err(RowRejection::TooFewFields {
            found: row.len(),
            required,
        });
    }

    let field = |column: Column| row.get(column.position()).unwrap_or_default().to_string();

    let raw_id = field(Column::Id);
    let id = raw_id
        .trim()
        .parse::<i64>()
        .map_err(|_| RowRejection::InvalidId(raw_id.clone()))?;

    Ok(TyrePathRecord {
        id,
        category_link: field(Column::CategoryLink),
        group: field(Column::Group),
        group_type: field(Column::GroupType),
        listing_type: field(Column::ListingType),
        brand: field(Column::Brand),
        model: field(Column::Model),
        year: field(Column::Year),
        version: field(Column::Version),
        season: field(Column::Season),
        usage: field(Column::Usage),
        service: field(Column::Service),
        position: field(Column::Position),
        seo_title: field(Column::SeoTitle),
        seo_description: field(Column::SeoDescription),
        seo_keyword: field(Column::SeoKeyword),
        seo_abstract: field(Column::SeoAbstract),
        created_date: field(Column::CreatedDate),
        is_active: field(Column::IsActive),
        section_width: field(Column::SectionWidth),
        aspect_ratio: field(Column::AspectRatio),
        rim_diameter: field(Column::RimDiameter),
        is_seo: field(Column::IsSeo),
    })
}

// ============================================================================
// Loader
// ============================================================================

impl Loader {
    /// Create a loader writing to `store` with the given settings.
    pub fn new(store: StoreConfig, config: LoaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Rebuild the store from the configured source file.
    ///
    /// The source is parsed on a blocking thread and handed over one batch at
    /// a time; inserts and index builds run on the caller's task.
    pub async fn run(&self) -> Result<LoadReport> {
        let source = &self.config.source;
        let file = tokio::fs::File::open(source)
            .await
            .map_err(|e| Error::source_file(format!("{}: {e}", source.display())))?
            .into_std()
            .await;

        remove_store(&self.store.path).await?;
        log::info!(
            "Loading {} into {}",
            source.display(),
            self.store.path.display()
        );

        let mut conn = SqliteConnectOptions::new()
            .filename(&self.store.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete)
            .connect()
            .await
            .map_err(Error::database)?;

        schema::create_table(&mut conn).await?;

        let (tx, mut rx) = mpsc::channel(PENDING_BATCHES);
        let batch_size = self.config.batch_size;
        let min_fields = self.config.min_fields;
        let reader = task::spawn_blocking(move || read_source(file, batch_size, min_fields, tx));

        let mut report = LoadReport::default();
        while let Some(batch) = rx.recv().await {
            insert_batch(&mut conn, &batch).await?;
            report.inserted += batch.len() as u64;
            report.batches += 1;
            log::info!("Inserted {} records...", report.inserted);
        }
        report.dropped = reader
            .await
            .map_err(|e| Error::source_file(format!("source reader stopped: {e}")))??;

        log::info!("Building {} secondary indexes...", schema::INDEXES.len());
        schema::create_indexes(&mut conn).await?;
        conn.close().await.map_err(Error::database)?;

        report.store_bytes = tokio::fs::metadata(&self.store.path).await?.len();

        if report.dropped > 0 {
            log::warn!(
                "Dropped {} source row(s) with fewer than {} fields or a non-integer id",
                report.dropped,
                self.config.min_fields
            );
        }
        log::info!(
            "Total records inserted: {} ({} batches, {:.2} MB)",
            report.inserted,
            report.batches,
            report.store_bytes as f64 / (1024.0 * 1024.0)
        );

        Ok(report)
    }
}

/// Parse `file`, sending accepted records in batches of `batch_size`.
///
/// Runs on a blocking thread. Returns the number of rejected rows. Stops
/// early, without error, once the receiving side has gone away.
fn read_source(
    file: File,
    batch_size: usize,
    min_fields: usize,
    tx: mpsc::Sender<Vec<TyrePathRecord>>,
) -> Result<u64> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut dropped = 0;
    let mut batch = Vec::with_capacity(batch_size);
    for row in reader.records() {
        let row = row.map_err(Error::source_file)?;
        match map_row(&row, min_fields) {
            Ok(record) => batch.push(record),
            Err(rejection) => {
                dropped += 1;
                let line = row.position().map(|p| p.line()).unwrap_or_default();
                log::debug!("Dropping source line {line}: {rejection}");
            }
        }

        if batch.len() >= batch_size {
            let full = std::mem::replace(&mut batch, Vec::with_capacity(batch_size));
            if tx.blocking_send(full).is_err() {
                return Ok(dropped);
            }
        }
    }
    if !batch.is_empty() {
        // A closed channel means the writer already failed and reports why.
        let _ = tx.blocking_send(batch);
    }
    Ok(dropped)
}

/// Insert `records` inside a single transaction.
async fn insert_batch(conn: &mut SqliteConnection, records: &[TyrePathRecord]) -> Result<()> {
    let mut tx = conn.begin().await.map_err(Error::database)?;

    for chunk in records.chunks(ROWS_PER_STATEMENT) {
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(schema::insert_prefix());
        qb.push_values(chunk, |mut b, record| {
            b.push_bind(record.id);
            for column in &Column::ALL[1..] {
                b.push_bind(record.text(*column).unwrap_or_default().to_string());
            }
        });
        qb.build().execute(&mut *tx).await.map_err(Error::database)?;
    }

    tx.commit().await.map_err(Error::database)?;
    Ok(())
}

/// Delete a store file and any SQLite companion files next to it.
async fn remove_store(path: &Path) -> Result<()> {
    let mut targets = vec![path.to_path_buf()];
    for suffix in ["-wal", "-shm", "-journal"] {
        let mut companion = path.as_os_str().to_owned();
        companion.push(suffix);
        targets.push(PathBuf::from(companion));
    }

    for target in targets {
        match tokio::fs::remove_file(&target).await {
            Ok(()) => log::info!("Removed existing {}", target.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
