//! # Generator Algorithms
//!
//! Each algorithm owns a state type implementing [`RngAlgorithm`]: the three
//! operations every descriptor provides (seed, raw draw, unit-interval draw).
//!
//! ## Static Dispatch
//!
//! [`GeneratorState`] wraps the concrete state types in an enum so that a
//! [`Generator`](crate::Generator) can pick its algorithm at runtime while all
//! draws dispatch through a `match` rather than a vtable.
//!
//! ## Module Structure
//!
//! - [`ranlxd`]: RANLUX double precision (luxury levels 1 and 2)
//! - [`mt19937`]: Mersenne Twister

pub mod mt19937;
pub mod ranlxd;

pub use mt19937::Mt19937;
pub use ranlxd::{Luxury, Ranluxd};

use crate::error::RngError;

/// Operations shared by every generator algorithm.
///
/// Implementations must be deterministic: after `seed(s)` the sequence of
/// draws depends on `s` alone. No operation may fail on a seeded state.
pub trait RngAlgorithm {
    /// Re-initialises the state from `seed`, discarding all stream position.
    fn seed(&mut self, seed: u64);

    /// Draws the next raw integer in the algorithm's `[min, max]` range.
    fn next_raw(&mut self) -> u64;

    /// Draws the next double in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
}

/// Identifies which state type an algorithm descriptor allocates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    /// RANLUX double precision at the given luxury level.
    Ranlxd(Luxury),
    /// 32-bit Mersenne Twister.
    Mt19937,
}

impl AlgorithmKind {
    /// Allocates a zeroed, unseeded state for this algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`RngError::Allocation`] if heap-backed state cannot be reserved.
    pub fn new_state(self) -> Result<GeneratorState, RngError> {
        match self {
            AlgorithmKind::Ranlxd(luxury) => Ok(GeneratorState::Ranlxd(Ranluxd::zeroed(luxury))),
            AlgorithmKind::Mt19937 => Mt19937::try_zeroed()
                .map(GeneratorState::Mt19937)
                .map_err(|source| RngError::Allocation {
                    what: "mt19937 state",
                    source,
                }),
        }
    }
}

/// Runtime-selected algorithm state.
#[derive(Clone, Debug, PartialEq)]
pub enum GeneratorState {
    /// RANLUX double precision state.
    Ranlxd(Ranluxd),
    /// Mersenne Twister state.
    Mt19937(Mt19937),
}

impl RngAlgorithm for GeneratorState {
    #[inline]
    fn seed(&mut self, seed: u64) {
        match self {
            GeneratorState::Ranlxd(s) => s.seed(seed),
            GeneratorState::Mt19937(s) => s.seed(seed),
        }
    }

    #[inline]
    fn next_raw(&mut self) -> u64 {
        match self {
            GeneratorState::Ranlxd(s) => s.next_raw(),
            GeneratorState::Mt19937(s) => s.next_raw(),
        }
    }

    #[inline]
    fn next_uniform(&mut self) -> f64 {
        match self {
            GeneratorState::Ranlxd(s) => s.next_uniform(),
            GeneratorState::Mt19937(s) => s.next_uniform(),
        }
    }
}
