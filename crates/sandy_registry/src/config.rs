//! Registry configuration.
//!
//! Loaded from TOML and optionally overridden by environment variables:
//!
//! | Key | Environment | Default |
//! |---|---|---|
//! | `default_algorithm` | `SANDY_RNG_ALGORITHM` | `ranlxd2` |
//! | `default_seed` | `SANDY_RNG_SEED` | `1717` |
//! | `capacity_hint` | `SANDY_RNG_CAPACITY` | `0` |

use std::path::Path;

use sandy_rng::{descriptor, AlgorithmDescriptor, DEFAULT_SEED};
use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable overriding `default_algorithm`.
pub const ENV_ALGORITHM: &str = "SANDY_RNG_ALGORITHM";
/// Environment variable overriding `default_seed`.
pub const ENV_SEED: &str = "SANDY_RNG_SEED";
/// Environment variable overriding `capacity_hint`.
pub const ENV_CAPACITY: &str = "SANDY_RNG_CAPACITY";

/// Configuration for a [`GeneratorRegistry`](crate::GeneratorRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Algorithm used by `allocate_default`.
    pub default_algorithm: String,
    /// Seed applied to every newly allocated generator.
    ///
    /// Fresh generators from `Generator::allocate` always start at
    /// [`DEFAULT_SEED`]. Any other value here, including one set through
    /// `SANDY_RNG_SEED`, makes registry allocations start a different stream
    /// from those.
    pub default_seed: u64,
    /// Number of slots to reserve up front.
    pub capacity_hint: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_algorithm: descriptor::RANLXD2.name().to_string(),
            default_seed: DEFAULT_SEED,
            capacity_hint: 0,
        }
    }
}

impl RegistryConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys, and
    /// [`ConfigError::UnknownAlgorithm`] if the algorithm does not exist.
    ///
    /// # Examples
    /// ```
    /// use sandy_registry::RegistryConfig;
    ///
    /// let config = RegistryConfig::from_toml_str("default_seed = 42").unwrap();
    /// assert_eq!(config.default_seed, 42);
    /// assert_eq!(config.default_algorithm, "ranlxd2");
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// As [`from_toml_str`](Self::from_toml_str), plus [`ConfigError::Io`]
    /// if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Applies overrides from the process environment.
    ///
    /// # Errors
    ///
    /// See [`apply_overrides`](Self::apply_overrides).
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`, then validates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvError`] if a numeric override does not parse,
    /// and [`ConfigError::UnknownAlgorithm`] if the resulting algorithm does
    /// not exist.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(algorithm) = lookup(ENV_ALGORITHM) {
            self.default_algorithm = algorithm.trim().to_string();
        }

        if let Some(seed) = lookup(ENV_SEED) {
            self.default_seed = seed
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("{}={}", ENV_SEED, seed)))?;
        }

        if let Some(capacity) = lookup(ENV_CAPACITY) {
            self.capacity_hint = capacity
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("{}={}", ENV_CAPACITY, capacity)))?;
        }

        self.validate()
    }

    /// Checks that the default algorithm exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownAlgorithm`] otherwise.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.default_descriptor().map(|_| ())
    }

    /// Resolves the default algorithm's descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownAlgorithm`] if no descriptor matches.
    pub fn default_descriptor(&self) -> Result<&'static AlgorithmDescriptor, ConfigError> {
        descriptor::find(&self.default_algorithm)
            .ok_or_else(|| ConfigError::UnknownAlgorithm(self.default_algorithm.clone()))
    }
}
