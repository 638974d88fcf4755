//! Error types for Tyrepath operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Tyrepath crates. Uses `thiserror` for derive macros.
//!
//! Driver-specific errors (sqlx, csv) are flattened into string-carrying
//! variants at the crate boundary so this crate stays dependency-free.

use std::fmt::Display;

use thiserror::Error;

/// Errors that can occur in Tyrepath operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A caller-supplied parameter could not be used.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name as the caller spelled it.
        name: String,
        /// What was wrong with it.
        message: String,
    },

    /// The backing store failed or is unavailable.
    #[error("Database error: {0}")]
    Database(String),

    /// The delimited source file could not be read.
    #[error("Source error: {0}")]
    Source(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Wrap a store driver error.
    pub fn database(err: impl Display) -> Self {
        Self::Database(err.to_string())
    }

    /// Wrap a source-file read error.
    pub fn source_file(err: impl Display) -> Self {
        Self::Source(err.to_string())
    }

    /// True when the error was caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

/// Result type alias using Tyrepath's Error type.
pub type Result<T> = std::result::Result<T, Error>;
