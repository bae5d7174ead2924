//! Static algorithm descriptors.
//!
//! An [`AlgorithmDescriptor`] is the process-wide, read-only record of one
//! algorithm: its display name, raw output range, state size, and which state
//! type a [`Generator`](crate::Generator) allocates for it.
//!
//! ## Available Algorithms
//!
//! | Name | min | max |
//! |---|---|---|
//! | `ranlxd1` | 0 | 2^32 - 1 |
//! | `ranlxd2` | 0 | 2^32 - 1 |
//! | `mt19937` | 0 | 2^32 - 1 |

use std::fmt;

use crate::algorithms::{AlgorithmKind, Luxury, Mt19937, Ranluxd};
use crate::error::RngError;

/// Immutable description of a generator algorithm.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct AlgorithmDescriptor {
    name: &'static str,
    min: u64,
    max: u64,
    size: usize,
    kind: AlgorithmKind,
}

impl AlgorithmDescriptor {
    /// Display name of the algorithm.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Smallest raw value the algorithm can return.
    #[inline]
    pub fn min(&self) -> u64 {
        self.min
    }

    /// Largest raw value the algorithm can return.
    #[inline]
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Size of the algorithm's state in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// State type allocated for this algorithm.
    #[inline]
    pub fn kind(&self) -> AlgorithmKind {
        self.kind
    }
}

impl fmt::Display for AlgorithmDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// RANLUX double precision, luxury level 1.
pub static RANLXD1: AlgorithmDescriptor = AlgorithmDescriptor {
    name: "ranlxd1",
    min: 0,
    max: 0xffff_ffff,
    size: std::mem::size_of::<Ranluxd>(),
    kind: AlgorithmKind::Ranlxd(Luxury::Level1),
};

/// RANLUX double precision, luxury level 2.
pub static RANLXD2: AlgorithmDescriptor = AlgorithmDescriptor {
    name: "ranlxd2",
    min: 0,
    max: 0xffff_ffff,
    size: std::mem::size_of::<Ranluxd>(),
    kind: AlgorithmKind::Ranlxd(Luxury::Level2),
};

/// Mersenne Twister MT19937.
pub static MT19937: AlgorithmDescriptor = AlgorithmDescriptor {
    name: "mt19937",
    min: 0,
    max: 0xffff_ffff,
    size: Mt19937::STATE_SIZE,
    kind: AlgorithmKind::Mt19937,
};

static ALGORITHMS: [&AlgorithmDescriptor; 3] = [&RANLXD1, &RANLXD2, &MT19937];

/// Returns every registered descriptor.
#[inline]
pub fn all() -> &'static [&'static AlgorithmDescriptor] {
    &ALGORITHMS
}

/// Looks up a descriptor by display name.
///
/// # Examples
/// ```
/// use sandy_rng::descriptor;
///
/// assert_eq!(descriptor::find("mt19937").unwrap().name(), "mt19937");
/// assert!(descriptor::find("unknown").is_none());
/// ```
pub fn find(name: &str) -> Option<&'static AlgorithmDescriptor> {
    ALGORITHMS.iter().copied().find(|d| d.name == name)
}

/// Like [`find`], but reports an unknown name as an error.
///
/// # Errors
///
/// Returns [`RngError::UnknownAlgorithm`] if no descriptor has this name.
pub fn lookup(name: &str) -> Result<&'static AlgorithmDescriptor, RngError> {
    find(name).ok_or_else(|| RngError::UnknownAlgorithm(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_ranges_are_ordered() {
        for descriptor in all() {
            assert!(descriptor.max() > descriptor.min(), "{}", descriptor);
            assert!(descriptor.size() > 0);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = all().iter().map(|d| d.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all().len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("ranlxd2").unwrap(), &RANLXD2);
        assert_eq!(
            lookup("ranlux"),
            Err(RngError::UnknownAlgorithm("ranlux".to_string()))
        );
    }

    #[test]
    fn test_state_sizes() {
        assert_eq!(RANLXD1.size(), RANLXD2.size());
        assert_eq!(MT19937.size(), 624 * 4 + std::mem::size_of::<usize>());
    }
}
