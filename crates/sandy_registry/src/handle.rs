//! Opaque generator handles.
//!
//! A [`HandleId`] names a slot in the registry together with the slot's
//! generation at allocation time. Freeing a generator bumps the slot's
//! generation, so an id kept past its `free` no longer matches and is
//! reported as stale rather than reaching whichever generator reuses the slot.
//!
//! Generations are 32-bit and wrap. Once a slot has been reused 2^32 times,
//! an id from its first use matches again.

use std::fmt;

/// Identifier of a live generator in a [`GeneratorRegistry`](crate::GeneratorRegistry).
///
/// # Examples
/// ```
/// use sandy_registry::HandleId;
///
/// let id = HandleId::from_raw(0x0000_0002_0000_0005);
/// assert_eq!(id.index(), 5);
/// assert_eq!(id.generation(), 2);
/// assert_eq!(HandleId::from_raw(id.to_raw()), id);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId {
    index: u32,
    generation: u32,
}

impl HandleId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index.
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Slot generation the handle was issued for.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Packs the id into a `u64` (generation high, index low) for hosts
    /// that can only carry an integer.
    #[inline]
    pub fn to_raw(self) -> u64 {
        (u64::from(self.generation) << 32) | u64::from(self.index)
    }

    /// Inverse of [`to_raw`](Self::to_raw).
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self {
            index: (raw & 0xffff_ffff) as u32,
            generation: (raw >> 32) as u32,
        }
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}
