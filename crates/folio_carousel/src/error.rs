//! Carousel errors
//!
//! Only construction and configuration can fail. Once built, every
//! controller operation is total.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating carousel configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse carousel config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors raised while constructing a carousel
#[derive(Debug, Error)]
pub enum CarouselError {
    #[error("a carousel needs at least one item")]
    Empty,

    #[error("duplicate item key {0}")]
    DuplicateKey(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
