//! # sandy_rng: Pluggable Pseudo-Random Number Generators
//!
//! ## Layer 1 (Core) Role
//!
//! sandy_rng is the bottom layer of the workspace, providing:
//! - Static algorithm descriptors (`descriptor`)
//! - Algorithm state implementations: RANLUX double precision and
//!   Mersenne Twister (`algorithms`)
//! - The [`Generator`] handle binding one descriptor to one owned state
//! - The [`UniformSource`] stream abstraction (`uniform`)
//! - Gaussian samplers and the normal density (`gaussian`)
//! - Error types (`error`)
//!
//! Handle bookkeeping for host bindings (opaque ids, free lists) lives in
//! `sandy_registry`; this crate has no dependency on it.
//!
//! ## Reproducibility
//!
//! Every generator is fully determined by its algorithm and seed. A freshly
//! allocated generator is seeded with [`DEFAULT_SEED`], so two unseeded
//! generators of the same algorithm produce identical streams.
//!
//! Generators are not cryptographically secure.
//!
//! ## Usage Example
//!
//! ```rust
//! use sandy_rng::{descriptor, gaussian, Generator};
//!
//! let mut rng = Generator::allocate(&descriptor::RANLXD2).unwrap();
//! rng.seed(42);
//!
//! let raw = rng.next_raw();
//! assert!(raw >= rng.min() && raw <= rng.max());
//!
//! let u = rng.next_uniform();
//! assert!((0.0..1.0).contains(&u));
//!
//! let z = gaussian::gaussian(&mut rng, 2.0);
//! assert!(z.is_finite());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod algorithms;
pub mod descriptor;
pub mod error;
pub mod gaussian;
pub mod generator;
pub mod uniform;

pub use descriptor::AlgorithmDescriptor;
pub use error::RngError;
pub use gaussian::{gaussian_pdf, ugaussian_pdf, Gaussian, GaussianMethod};
pub use generator::{Generator, DEFAULT_SEED};
pub use uniform::{RandSource, UniformSource};
