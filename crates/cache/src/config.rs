//! Cache configuration.
//!
//! Centralized, user-configurable limits for the two cache stores.
//! Configuration can be created programmatically, loaded from environment
//! variables, or loaded from a file.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

const MIB: usize = 1024 * 1024;

/// Error raised when loading or validating a cache configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration key held a value that could not be parsed.
    #[error("invalid value for configuration key: {0}")]
    InvalidValue(String),

    /// A limit was configured as zero.
    #[error("configuration key {0} must be non-zero")]
    ZeroLimit(String),

    /// I/O error reading a configuration file.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Limits for the two cache stores.
///
/// Defaults match the gallery's tuning: the thumbnail store holds many
/// small entries (500 entries, 50 MiB), the full-image store few large
/// ones (50 entries, 100 MiB).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of thumbnail entries.
    pub thumbnail_count_limit: usize,
    /// Maximum cumulative thumbnail cost in bytes.
    pub thumbnail_cost_limit: usize,
    /// Maximum number of full-image entries.
    pub full_count_limit: usize,
    /// Maximum cumulative full-image cost in bytes.
    pub full_cost_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            thumbnail_count_limit: 500,
            thumbnail_cost_limit: 50 * MIB,
            full_count_limit: 50,
            full_cost_limit: 100 * MIB,
        }
    }
}

impl CacheConfig {
    /// Sets both thumbnail store limits (entry count, cost in bytes).
    pub fn with_thumbnail_limits(mut self, count: usize, cost: usize) -> Self {
        self.thumbnail_count_limit = count;
        self.thumbnail_cost_limit = cost;
        self
    }

    /// Sets both full-image store limits (entry count, cost in bytes).
    pub fn with_full_limits(mut self, count: usize, cost: usize) -> Self {
        self.full_count_limit = count;
        self.full_cost_limit = cost;
        self
    }

    /// Sets the thumbnail cost limit in megabytes.
    pub fn with_thumbnail_mb(mut self, mb: usize) -> Self {
        self.thumbnail_cost_limit = mb * MIB;
        self
    }

    /// Sets the full-image cost limit in megabytes.
    pub fn with_full_mb(mut self, mb: usize) -> Self {
        self.full_cost_limit = mb * MIB;
        self
    }

    /// Checks that every limit is non-zero.
    ///
    /// # Errors
    /// Returns `ConfigError::ZeroLimit` naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("thumbnail_cache_entries", self.thumbnail_count_limit),
            ("thumbnail_cache_mb", self.thumbnail_cost_limit),
            ("full_cache_entries", self.full_count_limit),
            ("full_cache_mb", self.full_cost_limit),
        ];
        for (key, value) in limits {
            if value == 0 {
                return Err(ConfigError::ZeroLimit(key.to_string()));
            }
        }
        Ok(())
    }

    /// Loads configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GALLERY_THUMBNAIL_CACHE_ENTRIES`: thumbnail entry limit (default: 500)
    /// - `GALLERY_THUMBNAIL_CACHE_MB`: thumbnail cost limit in MB (default: 50)
    /// - `GALLERY_FULL_CACHE_ENTRIES`: full-image entry limit (default: 50)
    /// - `GALLERY_FULL_CACHE_MB`: full-image cost limit in MB (default: 100)
    ///
    /// # Errors
    /// Returns an error if any variable contains an invalid or zero value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("GALLERY_THUMBNAIL_CACHE_ENTRIES") {
            config.thumbnail_count_limit = parse_limit(&val, "GALLERY_THUMBNAIL_CACHE_ENTRIES")?;
        }

        if let Ok(val) = std::env::var("GALLERY_THUMBNAIL_CACHE_MB") {
            config.thumbnail_cost_limit = parse_limit(&val, "GALLERY_THUMBNAIL_CACHE_MB")? * MIB;
        }

        if let Ok(val) = std::env::var("GALLERY_FULL_CACHE_ENTRIES") {
            config.full_count_limit = parse_limit(&val, "GALLERY_FULL_CACHE_ENTRIES")?;
        }

        if let Ok(val) = std::env::var("GALLERY_FULL_CACHE_MB") {
            config.full_cost_limit = parse_limit(&val, "GALLERY_FULL_CACHE_MB")? * MIB;
        }

        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// Expected file format:
    /// ```toml
    /// thumbnail_cache_entries = 500
    /// thumbnail_cache_mb = 50
    /// full_cache_entries = 50
    /// full_cache_mb = 100
    /// ```
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&contents)
    }

    /// Parses configuration from a TOML string. Unknown keys are ignored.
    fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for line in toml_str.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim().trim_matches('"');

                match key {
                    "thumbnail_cache_entries" => {
                        config.thumbnail_count_limit = parse_limit(value, key)?;
                    }
                    "thumbnail_cache_mb" => {
                        config.thumbnail_cost_limit = parse_limit(value, key)? * MIB;
                    }
                    "full_cache_entries" => {
                        config.full_count_limit = parse_limit(value, key)?;
                    }
                    "full_cache_mb" => {
                        config.full_cost_limit = parse_limit(value, key)? * MIB;
                    }
                    _ => {}
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_limit(value: &str, key: &str) -> Result<usize, ConfigError> {
    let parsed = value
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))?;
    if parsed == 0 {
        return Err(ConfigError::ZeroLimit(key.to_string()));
    }
    Ok(parsed)
}
