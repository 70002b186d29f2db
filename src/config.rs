//! Configuration Module
//!
//! Handles loading the host configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::DEFAULT_TTL_SECONDS;

/// Host configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default TTL in seconds for entries set without explicit TTL
    pub default_ttl: f64,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds
    pub cleanup_interval: u64,
    /// Directory holding the persisted snapshot
    pub snapshot_dir: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - Default TTL in seconds, finite (default: 86400)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `SNAPSHOT_DIR` - Snapshot directory (default: ./data)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl: &f64| ttl.is_finite())
                .unwrap_or(defaults.default_ttl),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cleanup_interval),
            snapshot_dir: env::var("SNAPSHOT_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_dir),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL_SECONDS,
            server_port: 3000,
            cleanup_interval: 60,
            snapshot_dir: PathBuf::from("./data"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_ttl, 86400.0);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 60);
        assert_eq!(config.snapshot_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("DEFAULT_TTL");
        env::remove_var("SERVER_PORT");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("SNAPSHOT_DIR");

        let config = Config::from_env();
        assert_eq!(config.default_ttl, 86400.0);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 60);
        assert_eq!(config.snapshot_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_config_rejects_non_finite_default_ttl() {
        for raw in ["inf", "-infinity", "NaN"] {
            env::set_var("DEFAULT_TTL", raw);
            let config = Config::from_env();
            assert_eq!(config.default_ttl, 86400.0, "DEFAULT_TTL={raw} should fall back");
        }
        env::remove_var("DEFAULT_TTL");
    }
}
