//! CLI argument parsing and command definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tyrepath_query::SearchRequest;

// ============================================================================
// CLI argument types
// ============================================================================

/// Load a tyre catalog export into SQLite and search it.
#[derive(Parser, Debug)]
#[command(name = "tyrepath", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "TYREPATH_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rebuild the store from the source export.
    Load {
        /// Source file (overrides `loader.source`).
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Store file (overrides `store.path`).
        #[arg(long)]
        db: Option<PathBuf>,

        /// Records per transaction (overrides `loader.batch_size`).
        #[arg(short, long)]
        batch_size: Option<usize>,
    },

    /// Start the HTTP API.
    Serve {
        /// Address to bind (overrides `server.host`).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides `server.port`).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one search and print the result as JSON.
    Search(SearchArgs),

    /// Print catalog counts as JSON.
    Stats,

    /// Print the most common brands as JSON.
    Brands,

    /// Check that the store exists.
    Health,

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Search parameters, mirroring the HTTP query string.
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Free-text query.
    #[arg(short = 'q', long = "query")]
    pub query: Option<String>,

    #[arg(long)]
    pub group_type: Option<String>,

    #[arg(long)]
    pub listing_type: Option<String>,

    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub year: Option<String>,

    #[arg(long)]
    pub version: Option<String>,

    #[arg(long)]
    pub season: Option<String>,

    #[arg(long)]
    pub usage: Option<String>,

    #[arg(long)]
    pub service: Option<String>,

    #[arg(long)]
    pub position: Option<String>,

    #[arg(short, long)]
    pub limit: Option<String>,

    #[arg(short, long)]
    pub offset: Option<String>,
}

impl From<SearchArgs> for SearchRequest {
    fn from(args: SearchArgs) -> Self {
        Self {
            q: args.query,
            group_type: args.group_type,
            listing_type: args.listing_type,
            brand: args.brand,
            model: args.model,
            year: args.year,
            version: args.version,
            season: args.season,
            usage: args.usage,
            service: args.service,
            position: args.position,
            limit: args.limit,
            offset: args.offset,
        }
    }
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Print the effective configuration as TOML.
    Show,

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
