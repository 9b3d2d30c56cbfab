//! Catalog configuration loading from config.toml
//!
//! The file lists the colors and the categories (with their sizes) that a fresh
//! database is seeded with, plus settings for media link verification.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{path::Path, time::Duration};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct CatalogConfig {
    /// Colors to seed when the colors table is empty
    #[serde(default)]
    pub colors: Vec<ColorConfig>,
    /// Categories to seed when the categories table is empty
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
    /// Media link verification settings
    #[serde(default)]
    pub media: MediaConfig,
}

/// A seed color
#[derive(Debug, Deserialize, Clone)]
pub struct ColorConfig {
    /// Display name
    pub name: String,
    /// Swatch as `#RRGGBB`
    pub hex_code: String,
}

/// A seed category and the sizes it offers
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// Display name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Size labels, in display order
    #[serde(default)]
    pub sizes: Vec<String>,
}

/// Settings for probing pasted image links
#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    /// How long an image link may take to render before it is discarded
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

const fn default_probe_timeout_ms() -> u64 {
    3000
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

impl MediaConfig {
    /// Probe timeout as a [`Duration`].
    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

/// Loads catalog configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let path = path.as_ref();
    tracing::debug!("Loading catalog configuration from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

/// Loads configuration from `CATALOG_CONFIG`, falling back to ./config.toml
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_default_config() -> Result<CatalogConfig> {
    let path = std::env::var("CATALOG_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}
