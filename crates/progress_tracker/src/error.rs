//! Error types for the progress tracker.
//!
//! Store errors are produced by `KeyValueStore` backends. The tracker itself
//! swallows them (progress is best-effort), but they stay typed so callers
//! that talk to a store directly can react.

use std::path::PathBuf;

/// Failure reported by a persistence backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Store is read-only, refused write to '{0}'")]
    ReadOnly(String),
}

/// Failure loading the optional TOML configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid course layout: {0}")]
    Layout(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
