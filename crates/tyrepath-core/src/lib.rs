//! Tyrepath core: shared types, errors, and configuration.
//!
//! This crate provides the foundational types used across all Tyrepath crates.
//! It has no internal Tyrepath dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`record`]: The catalog record and its stored column layout
//! - [`config`]: Configuration sections for store, loader, search, and server

pub mod config;
pub mod error;
pub mod record;

// Re-export key types at crate root for convenience
pub use config::{LoaderConfig, SearchConfig, ServerConfig, StoreConfig};
pub use error::{Error, Result};
pub use record::{Column, TABLE_NAME, TyrePathRecord, UNSET_IDENTIFIER, is_unset_identifier};
