//! Error types for taskroute-core

use std::path::PathBuf;
use thiserror::Error;

/// Routing error type
///
/// Only configuration can fail. Every operation on a constructed router is
/// total.
#[derive(Debug, Error)]
pub enum Error {
    /// Config file missing or unreadable
    #[error("failed to read config {path:?}: {source}")]
    ConfigRead {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file extension is neither `.json` nor `.toml`
    #[error("unsupported config format: {path:?}")]
    UnsupportedConfigFormat {
        /// Offending path
        path: PathBuf,
    },

    /// Config document could not be parsed
    #[error("failed to parse config {path:?}: {message}")]
    ConfigParse {
        /// Path that was parsed
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Config parsed but violates a constraint
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Monthly projection factor is negative or not finite
    #[error("invalid periods per month: {0}")]
    InvalidProjection(f64),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
