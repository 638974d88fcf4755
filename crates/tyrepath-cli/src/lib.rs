//! Command-line interface for Tyrepath.
//!
//! Wires configuration loading, logging and the `load`, `serve`, `search`,
//! `stats`, `brands`, `health`, `version` and `config` commands together.

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;

pub use app::TyrePathCli;
pub use cli::{CliArgs, Command, ConfigAction, SearchArgs};
pub use config::TyrePathConfig;
