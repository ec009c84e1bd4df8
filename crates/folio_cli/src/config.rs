//! Folio configuration file handling

use anyhow::{Context, Result};
use folio_carousel::CarouselConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "folio.toml";

/// Top-level Folio configuration (folio.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FolioConfig {
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

/// Site copy
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Phrases cycled by the about page headline
    #[serde(default = "default_headline")]
    pub headline: Vec<String>,
}

fn default_headline() -> Vec<String> {
    vec![
        "product designer".to_string(),
        "girl obsessed with trying new things".to_string(),
    ]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            headline: default_headline(),
        }
    }
}

impl FolioConfig {
    /// Resolve `path` to a config file: a file is used as is, a directory is
    /// searched for folio.toml
    pub fn config_path(path: &Path) -> PathBuf {
        if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        }
    }

    /// Load configuration, falling back to defaults when no file exists
    pub fn load_or_default(path: &Path) -> Result<Self> {
        let config_path = Self::config_path(path);
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&config_path)
    }

    /// Load and validate a config file
    pub fn load(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load {}", config_path.display()))?;

        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FolioConfig = toml::from_str(content).context("Invalid TOML")?;
        config.carousel.validate()?;
        if config.site.headline.is_empty() {
            anyhow::bail!("site.headline must contain at least one phrase");
        }
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
