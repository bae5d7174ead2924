//! Error types for generator construction.
//!
//! Drawing from a live generator never fails; the only runtime failures are
//! running out of memory while building a generator and naming an algorithm
//! that does not exist.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors raised while constructing a [`Generator`](crate::Generator).
///
/// A generator is never handed out partially constructed: if any of its
/// storage cannot be reserved, allocation fails as a whole.
///
/// # Examples
/// ```
/// use sandy_rng::RngError;
///
/// let err = RngError::UnknownAlgorithm("taus3".to_string());
/// assert_eq!(format!("{}", err), "Unknown generator algorithm: taus3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RngError {
    /// Memory for the generator state could not be reserved.
    #[error("Failed to allocate space for {what}: {source}")]
    Allocation {
        /// What was being allocated.
        what: &'static str,
        /// Underlying reservation failure.
        #[source]
        source: TryReserveError,
    },

    /// No algorithm descriptor is registered under this name.
    #[error("Unknown generator algorithm: {0}")]
    UnknownAlgorithm(String),
}

impl RngError {
    /// Returns true if this is an allocation failure.
    #[inline]
    pub fn is_allocation(&self) -> bool {
        matches!(self, RngError::Allocation { .. })
    }
}
