//! The `tyrepath` application: logging setup and command dispatch.

use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tyrepath_api::ApiState;
use tyrepath_core::{Error, Result};
use tyrepath_query::{CatalogSearch, SearchRequest};
use tyrepath_store::{Catalog, Loader};

use crate::cli::{CliArgs, Command};
use crate::config::TyrePathConfig;
use crate::config_handlers;

// ============================================================================
// TyrePathCli
// ============================================================================

/// The CLI application, holding the resolved configuration.
pub struct TyrePathCli {
    config: TyrePathConfig,
    version: String,
}

impl TyrePathCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let config = TyrePathConfig::load(args.config.as_deref())?;
        Ok(Self::new(config))
    }

    /// Create with an explicit configuration.
    pub fn new(config: TyrePathConfig) -> Self {
        Self {
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        match args.command {
            Some(Command::Load {
                source,
                db,
                batch_size,
            }) => {
                let mut store = self.config.store.clone();
                let mut loader = self.config.loader.clone();
                if let Some(db) = db {
                    store.path = db;
                }
                if let Some(source) = source {
                    loader.source = source;
                }
                if let Some(batch_size) = batch_size {
                    loader.batch_size = batch_size;
                }

                let report = Loader::new(store, loader)?.run().await?;
                println!(
                    "Loaded {} records ({} dropped) in {} batches; store is {:.2} MB",
                    report.inserted,
                    report.dropped,
                    report.batches,
                    report.store_bytes as f64 / (1024.0 * 1024.0)
                );
                Ok(())
            }
            Some(Command::Serve { host, port }) => {
                let mut server = self.config.server.clone();
                if let Some(host) = host {
                    server.host = host;
                }
                if let Some(port) = port {
                    server.port = port;
                }
                let state = ApiState::from_config(&self.config.store, self.config.search.clone())?;
                tyrepath_api::serve(&server, state).await
            }
            Some(Command::Search(search)) => {
                let page = self.search_service()?.search(&SearchRequest::from(search)).await?;
                print_json(&page)
            }
            Some(Command::Stats) => print_json(&self.search_service()?.stats().await?),
            Some(Command::Brands) => print_json(&self.search_service()?.brands().await?),
            Some(Command::Health) => {
                let path = &self.config.store.path;
                if Catalog::open(&self.config.store).is_available() {
                    println!("store: ok ({})", path.display());
                    Ok(())
                } else {
                    Err(Error::not_found(format!("store not found at {}", path.display())))
                }
            }
            Some(Command::Version) => {
                println!("tyrepath {}", self.version);
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("tyrepath {}; use --help for usage", self.version);
                Ok(())
            }
        }
    }

    fn search_service(&self) -> Result<CatalogSearch> {
        CatalogSearch::new(Catalog::open(&self.config.store), self.config.search.clone())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| Error::invalid_data(e.to_string()))?;
    println!("{text}");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tyrepath_core::StoreConfig;
    use tyrepath_store::testing::{FixtureStore, sample_rows, write_source};

    fn cli_with_store(store: StoreConfig) -> TyrePathCli {
        TyrePathCli::new(TyrePathConfig {
            store,
            ..Default::default()
        })
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        TyrePathCli::init_logging(false, true);
        TyrePathCli::init_logging(true, false);
    }

    #[tokio::test]
    async fn test_version_and_no_command() {
        let cli = TyrePathCli::new(TyrePathConfig::default());
        cli.run(CliArgs::parse_from(["tyrepath", "version"])).await.unwrap();
        cli.run(CliArgs::parse_from(["tyrepath"])).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_command_builds_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = dir.path().join("export.csv");
        let db = dir.path().join("out.db");
        write_source(&source, &sample_rows());

        let cli = TyrePathCli::new(TyrePathConfig::default());
        let args = CliArgs::parse_from([
            "tyrepath",
            "load",
            "--source",
            source.to_str().unwrap(),
            "--db",
            db.to_str().unwrap(),
            "--batch-size",
            "2",
        ]);
        cli.run(args).await.unwrap();
        assert!(db.is_file());

        let cli = cli_with_store(StoreConfig::at(&db));
        cli.run(CliArgs::parse_from(["tyrepath", "health"])).await.unwrap();
    }

    #[tokio::test]
    async fn test_query_commands_against_fixture() {
        let fixture = FixtureStore::load(&sample_rows()).await;
        let cli = cli_with_store(fixture.store.clone());

        for argv in [
            vec!["tyrepath", "search", "-q", "test"],
            vec!["tyrepath", "stats"],
            vec!["tyrepath", "brands"],
            vec!["tyrepath", "health"],
        ] {
            cli.run(CliArgs::parse_from(argv)).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_search_command_rejects_bad_limit() {
        let fixture = FixtureStore::load(&sample_rows()).await;
        let cli = cli_with_store(fixture.store.clone());
        let err = cli
            .run(CliArgs::parse_from(["tyrepath", "search", "--limit", "lots"]))
            .await
            .unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_health_fails_without_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = cli_with_store(StoreConfig::at(dir.path().join("absent.db")));
        let err = cli
            .run(CliArgs::parse_from(["tyrepath", "health"]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
