//! Error types for the registry and its configuration.

use std::collections::TryReserveError;
use std::path::PathBuf;

use sandy_rng::RngError;
use thiserror::Error;

use crate::handle::HandleId;

/// Errors from registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The handle was never allocated, or has already been freed.
    #[error("Stale generator handle: {0}")]
    StaleHandle(HandleId),

    /// The generator itself could not be built.
    #[error(transparent)]
    Rng(#[from] RngError),

    /// The registry could not grow its slot table.
    #[error("Failed to allocate space for rng struct: {0}")]
    Allocation(#[source] TryReserveError),

    /// The registry configuration is invalid.
    #[error("Invalid registry configuration: {0}")]
    Config(String),
}

/// Errors from loading a [`RegistryConfig`](crate::RegistryConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for this schema.
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configured default algorithm does not exist.
    #[error("Unknown generator algorithm: {0}")]
    UnknownAlgorithm(String),

    /// An environment override could not be parsed.
    #[error("Environment variable error: {0}")]
    EnvError(String),
}
