//! Configuration for the `tyrepath` binary.
//!
//! [`TyrePathConfig`] gathers every section from `tyrepath-core` and loads
//! them from a TOML file, environment variables and defaults using the
//! `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `TYREPATH_CONFIG` environment variable
//! 3. XDG default: `~/.config/tyrepath/config.toml`
//! 4. Built-in defaults
//!
//! `TYREPATH_<SECTION>_<KEY>` variables are overlaid on top of the file.

use std::path::PathBuf;

use confyg::{Confygery, env};
use serde::{Deserialize, Serialize};
use tyrepath_core::{Error, LoaderConfig, Result, SearchConfig, ServerConfig, StoreConfig};

/// Environment prefix for config overrides.
pub const ENV_PREFIX: &str = "TYREPATH";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TYREPATH_CONFIG";

/// Sections that accept environment overrides.
const ENV_SECTIONS: [&str; 4] = ["store", "loader", "search", "server"];

/// Complete configuration for the loader, search service and server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TyrePathConfig {
    pub store: StoreConfig,
    pub loader: LoaderConfig,
    pub search: SearchConfig,
    pub server: ServerConfig,
}

impl TyrePathConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// A config path that does not exist is skipped and defaults apply.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path)
            && path.exists()
        {
            log::debug!("loading config from {}", path.display());
            builder
                .add_file(&path.to_string_lossy())
                .map_err(|e| Error::config(format!("config file: {e}")))?;
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        for section in ENV_SECTIONS {
            env_opts.add_section(section);
        }
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tyrepath").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Mutex, MutexGuard};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// RAII guard for env var manipulation in tests.
    ///
    /// Holds a process-wide lock so guarded tests never interleave.
    struct EnvGuard {
        key: String,
        prev: Option<String>,
        _lock: MutexGuard<'static, ()>,
    }

    impl EnvGuard {
        fn lock() -> MutexGuard<'static, ()> {
            ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
        }

        fn new(key: &str, value: &str) -> Self {
            let lock = Self::lock();
            let prev = std::env::var(key).ok();
            unsafe { std::env::set_var(key, value) };
            Self {
                key: key.to_string(),
                prev,
                _lock: lock,
            }
        }

        fn remove(key: &str) -> Self {
            let lock = Self::lock();
            let prev = std::env::var(key).ok();
            unsafe { std::env::remove_var(key) };
            Self {
                key: key.to_string(),
                prev,
                _lock: lock,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match self.prev {
                Some(ref val) => unsafe { std::env::set_var(&self.key, val) },
                None => unsafe { std::env::remove_var(&self.key) },
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = TyrePathConfig::default();
        assert_eq!(config.store.path, PathBuf::from("tyre_paths.db"));
        assert_eq!(config.loader.source, PathBuf::from("UBY.TyreListFriendlyPath.csv"));
        assert_eq!(config.loader.batch_size, 10_000);
        assert_eq!(config.search.default_limit, 50);
        assert_eq!(config.search.max_limit, 200);
        assert_eq!(config.search.brand_limit, 100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5001);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [store]
            path = "/data/catalog.db"

            [loader]
            batch_size = 500

            [search]
            site_origin = "https://example.com"

            [server]
            port = 8080
        "#;

        let config: TyrePathConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.store.path, PathBuf::from("/data/catalog.db"));
        assert_eq!(config.store.max_connections, 8);
        assert_eq!(config.loader.batch_size, 500);
        assert_eq!(config.loader.min_fields, 20);
        assert_eq!(config.search.site_origin, "https://example.com");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_config_to_toml() {
        let config = TyrePathConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("[store]"));
        assert!(toml_str.contains("[loader]"));
        assert!(toml_str.contains("[search]"));
        assert!(toml_str.contains("port = 5001"));

        let parsed: TyrePathConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.search.site_origin, config.search.site_origin);
    }

    #[test]
    fn test_config_load_from_file() {
        let _lock = EnvGuard::lock();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                [store]
                path = "loaded.db"
                [server]
                port = 9090
            "#,
        )
        .unwrap();

        let config = TyrePathConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.store.path, PathBuf::from("loaded.db"));
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_config_load_missing_file_uses_defaults() {
        let _lock = EnvGuard::lock();
        let config = TyrePathConfig::load(Some("/nonexistent/tyrepath.toml")).unwrap();
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.search.max_limit, 200);
    }

    #[test]
    fn test_config_load_env_overlay() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                [search]
                site_origin = "https://file.example"
            "#,
        )
        .unwrap();

        let _guard = EnvGuard::new("TYREPATH_SEARCH_SITE_ORIGIN", "https://env.example");
        let config = TyrePathConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.search.site_origin, "https://env.example");
    }

    #[test]
    fn test_config_load_numeric_env_overlay() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 7000\nhost = \"127.0.0.1\"\n").unwrap();

        let _guard = EnvGuard::new("TYREPATH_SERVER_PORT", "6001");
        let config = TyrePathConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.server.port, 6001);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_config_load_rejects_non_numeric_env() {
        let _guard = EnvGuard::new("TYREPATH_SERVER_PORT", "http");
        let err = TyrePathConfig::load(Some("/nonexistent/tyrepath.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_resolve_config_path_explicit() {
        let path = TyrePathConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_env() {
        let _guard = EnvGuard::new(CONFIG_ENV, "/env/config.toml");
        let path = TyrePathConfig::resolve_config_path(None);
        assert_eq!(path, Some(PathBuf::from("/env/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_default() {
        let _guard = EnvGuard::remove(CONFIG_ENV);
        let path = TyrePathConfig::resolve_config_path(None).unwrap();
        let text = path.to_str().unwrap();
        assert!(text.contains("tyrepath"));
        assert!(text.ends_with("config.toml"));
    }
}
