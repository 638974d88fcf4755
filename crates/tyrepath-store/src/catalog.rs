//! Read-side handle on a loaded store.
//!
//! [`Catalog`] never creates or writes the store. Connections are opened
//! lazily, read-only, and handed out one per request; dropping the
//! [`CatalogConnection`] returns it to the pool on every exit path.

use std::path::{Path, PathBuf};

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use tyrepath_core::{Error, Result, StoreConfig};

/// A pooled read-only connection to the catalog store.
pub type CatalogConnection = PoolConnection<Sqlite>;

/// Shared, cheaply cloneable handle on the catalog store.
#[derive(Clone, Debug)]
pub struct Catalog {
    pool: SqlitePool,
    path: PathBuf,
}

impl Catalog {
    /// Create a handle for the store described by `config`.
    ///
    /// No connection is attempted here, so a service can start before the
    /// loader has produced the store.
    pub fn open(config: &StoreConfig) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(false)
            .read_only(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_lazy_with(options);

        Self {
            pool,
            path: config.path.clone(),
        }
    }

    /// Path of the backing store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the backing store file exists.
    ///
    /// This is an existence check only; the file's contents are not inspected.
    pub fn is_available(&self) -> bool {
        self.path.is_file()
    }

    /// Acquire a connection for the duration of one request.
    pub async fn acquire(&self) -> Result<CatalogConnection> {
        if !self.is_available() {
            return Err(Error::database(format!(
                "store not found at {}",
                self.path.display()
            )));
        }
        self.pool.acquire().await.map_err(Error::database)
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// ============================================================================
// Tests
// ============================================================================
