//! Configuration sections shared by the loader and the search service.
//!
//! Each section is a plain serde struct with defaults, handed explicitly to
//! the component that needs it. File and environment layering lives in the
//! CLI crate; nothing here reads global state.
//!
//! Numeric fields also accept their value as a string (`port = "8080"`),
//! which is how environment overrides arrive.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::record::Column;
use crate::{Error, Result};

// ============================================================================
// Store
// ============================================================================

/// Location and pooling for the persisted store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,

    /// Upper bound on concurrently open read connections.
    #[serde(deserialize_with = "number")]
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("tyre_paths.db"),
            max_connections: 8,
        }
    }
}

impl StoreConfig {
    /// Store config pointing at `path` with default pooling.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Loader
// ============================================================================

/// Bulk loader settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Delimited source export to load.
    pub source: PathBuf,

    /// Records per committed transaction.
    #[serde(deserialize_with = "number")]
    pub batch_size: usize,

    /// Minimum field count for a source row to be accepted.
    #[serde(deserialize_with = "number")]
    pub min_fields: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("UBY.TyreListFriendlyPath.csv"),
            batch_size: 10_000,
            min_fields: Column::REQUIRED + 1,
        }
    }
}

impl LoaderConfig {
    /// Reject settings the loader cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::config("loader.batch_size must be at least 1"));
        }
        if !(Column::REQUIRED..=Column::COUNT).contains(&self.min_fields) {
            return Err(Error::config(format!(
                "loader.min_fields must be between {} and {}, got {}",
                Column::REQUIRED,
                Column::COUNT,
                self.min_fields
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Search
// ============================================================================

/// Search service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Page size used when the caller gives none.
    #[serde(deserialize_with = "number")]
    pub default_limit: u32,

    /// Hard ceiling on page size.
    #[serde(deserialize_with = "number")]
    pub max_limit: u32,

    /// Number of brands returned by the brands listing.
    #[serde(deserialize_with = "number")]
    pub brand_limit: u32,

    /// Site origin prepended to a category link to form its public URL.
    pub site_origin: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 50,
            max_limit: 200,
            brand_limit: 100,
            site_origin: "https://www.bridgestone.com.tr".to_string(),
        }
    }
}

impl SearchConfig {
    /// Reject settings the search service cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.default_limit > self.max_limit {
            return Err(Error::config(format!(
                "search.default_limit ({}) exceeds search.max_limit ({})",
                self.default_limit, self.max_limit
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Server
// ============================================================================

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    #[serde(deserialize_with = "number")]
    pub port: u16,

    /// Host address to bind to.
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5001,
            host: "0.0.0.0".to_string(),
        }
    }
}

/// Deserialize a number given either natively or as a numeric string.
fn number<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText<T> {
        Number(T),
        Text(String),
    }

    match NumberOrText::<T>::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("invalid number {text:?}: {e}"))),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let store = StoreConfig::default();
        assert_eq!(store.path, PathBuf::from("tyre_paths.db"));

        let loader = LoaderConfig::default();
        assert_eq!(loader.batch_size, 10_000);
        assert_eq!(loader.min_fields, 20);
        assert!(loader.validate().is_ok());

        let search = SearchConfig::default();
        assert_eq!(search.default_limit, 50);
        assert_eq!(search.max_limit, 200);
        assert_eq!(search.brand_limit, 100);
        assert!(search.validate().is_ok());

        let server = ServerConfig::default();
        assert_eq!(server.port, 5001);
    }

    #[test]
    fn test_loader_rejects_zero_batch() {
        let loader = LoaderConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(matches!(loader.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_loader_min_fields_bounds() {
        for ok in [19, 20, 23] {
            let loader = LoaderConfig {
                min_fields: ok,
                ..Default::default()
            };
            assert!(loader.validate().is_ok(), "min_fields={ok}");
        }
        for bad in [0, 18, 24] {
            let loader = LoaderConfig {
                min_fields: bad,
                ..Default::default()
            };
            assert!(loader.validate().is_err(), "min_fields={bad}");
        }
    }

    #[test]
    fn test_search_default_above_max() {
        let search = SearchConfig {
            default_limit: 500,
            ..Default::default()
        };
        assert!(search.validate().is_err());
    }

    #[test]
    fn test_partial_section_from_toml() {
        let search: SearchConfig = toml::from_str("max_limit = 100").unwrap();
        assert_eq!(search.max_limit, 100);
        assert_eq!(search.default_limit, 50);
    }

    #[test]
    fn test_store_at() {
        let store = StoreConfig::at("/tmp/x.db");
        assert_eq!(store.path, PathBuf::from("/tmp/x.db"));
        assert_eq!(store.max_connections, 8);
    }

    #[test]
    fn test_numbers_accepted_as_strings() {
        let server: ServerConfig = toml::from_str(r#"port = "8080""#).unwrap();
        assert_eq!(server.port, 8080);

        let loader: LoaderConfig = toml::from_str("batch_size = \"500\"\nmin_fields = 23").unwrap();
        assert_eq!(loader.batch_size, 500);
        assert_eq!(loader.min_fields, 23);

        let store: StoreConfig = toml::from_str(r#"max_connections = " 4 ""#).unwrap();
        assert_eq!(store.max_connections, 4);
    }

    #[test]
    fn test_non_numeric_string_rejected() {
        let err = toml::from_str::<ServerConfig>(r#"port = "http""#).unwrap_err();
        assert!(err.to_string().contains("http"));
        assert!(toml::from_str::<ServerConfig>(r#"port = "70000""#).is_err());
    }
}
