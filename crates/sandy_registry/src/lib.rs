//! # sandy_registry: Handle-Based Generator API
//!
//! ## Layer 2 (Registry) Role
//!
//! Host-language bindings cannot hold a Rust [`Generator`] directly. This
//! crate keeps live generators in an arena and hands out opaque
//! [`HandleId`]s instead:
//! - Allocate / free / seed / query / sample by handle (`registry`)
//! - Generational ids that detect use after free (`handle`)
//! - Registry configuration from TOML and environment (`config`)
//! - Error types (`error`)
//!
//! A binding maps its own object identity to a [`HandleId`] (or its packed
//! `u64` form) and calls [`GeneratorRegistry::free`] when the host object is
//! released.
//!
//! ## Usage Example
//!
//! ```rust
//! use sandy_registry::{GeneratorRegistry, RegistryConfig};
//!
//! let mut registry = GeneratorRegistry::new(RegistryConfig::default()).unwrap();
//! let id = registry.allocate("mt19937").unwrap();
//!
//! registry.seed(id, 42).unwrap();
//! let z = registry.gaussian(id, 2.0).unwrap();
//! assert!(z.is_finite());
//!
//! assert!(registry.free(id));
//! assert!(!registry.free(id)); // second free is a no-op
//! assert!(registry.next_uniform(id).is_err());
//! ```

#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod handle;
pub mod registry;

pub use config::RegistryConfig;
pub use error::{ConfigError, RegistryError};
pub use handle::HandleId;
pub use registry::GeneratorRegistry;

pub use sandy_rng::{gaussian_pdf, ugaussian_pdf, Generator};
