//! Generator handle: one descriptor bound to one exclusively owned state.
//!
//! A [`Generator`] is created by [`Generator::allocate`], which also seeds it
//! with [`DEFAULT_SEED`], so an unseeded generator is still deterministic.
//! Dropping the generator releases its state.
//!
//! Draws mutate the state in place and need `&mut self`; a generator is
//! `Send`, so independent generators can be driven from different threads.

use std::fmt;

use rand::RngCore;

use crate::algorithms::{GeneratorState, RngAlgorithm};
use crate::descriptor::AlgorithmDescriptor;
use crate::error::RngError;
use crate::uniform::UniformSource;

/// Seed applied by [`Generator::allocate`].
pub const DEFAULT_SEED: u64 = 1717;

/// 2^32, scale from unit-interval output to a 32-bit word.
const TWO_POW_32: f64 = 4_294_967_296.0;

/// A pseudo-random generator instance.
///
/// # Examples
///
/// ```rust
/// use sandy_rng::{descriptor, Generator};
///
/// let mut a = Generator::allocate(&descriptor::MT19937).unwrap();
/// let mut b = Generator::allocate(&descriptor::MT19937).unwrap();
///
/// // Both carry the default seed
/// assert_eq!(a.next_raw(), b.next_raw());
///
/// a.seed(2024);
/// b.seed(2024);
/// assert_eq!(a.next_uniform(), b.next_uniform());
/// ```
pub struct Generator {
    descriptor: &'static AlgorithmDescriptor,
    state: GeneratorState,
}

impl Generator {
    /// Allocates a generator for `descriptor`, seeded with [`DEFAULT_SEED`].
    ///
    /// # Errors
    ///
    /// Returns [`RngError::Allocation`] if the state cannot be reserved.
    #[inline]
    pub fn allocate(descriptor: &'static AlgorithmDescriptor) -> Result<Self, RngError> {
        Self::allocate_seeded(descriptor, DEFAULT_SEED)
    }

    /// Allocates a generator for `descriptor`, seeded with `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`RngError::Allocation`] if the state cannot be reserved.
    pub fn allocate_seeded(
        descriptor: &'static AlgorithmDescriptor,
        seed: u64,
    ) -> Result<Self, RngError> {
        let mut state = descriptor.kind().new_state()?;
        state.seed(seed);
        Ok(Self { descriptor, state })
    }

    /// Re-initialises the stream from `seed`.
    #[inline]
    pub fn seed(&mut self, seed: u64) {
        self.state.seed(seed);
    }

    /// Descriptor this generator was allocated from.
    #[inline]
    pub fn descriptor(&self) -> &'static AlgorithmDescriptor {
        self.descriptor
    }

    /// Algorithm name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.descriptor.name()
    }

    /// State size in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.descriptor.size()
    }

    /// Smallest value [`next_raw`](Self::next_raw) can return.
    #[inline]
    pub fn min(&self) -> u64 {
        self.descriptor.min()
    }

    /// Largest value [`next_raw`](Self::next_raw) can return.
    #[inline]
    pub fn max(&self) -> u64 {
        self.descriptor.max()
    }

    /// Read-only view of the algorithm state.
    #[inline]
    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    /// Draws a raw integer in `[min, max]`.
    #[inline]
    pub fn next_raw(&mut self) -> u64 {
        self.state.next_raw()
    }

    /// Draws a double in `[0, 1)`.
    #[inline]
    pub fn next_uniform(&mut self) -> f64 {
        self.state.next_uniform()
    }

    /// Draws a double in `(0, 1)`, redrawing exact zeros.
    #[inline]
    pub fn next_uniform_positive(&mut self) -> f64 {
        UniformSource::next_uniform_positive(self)
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("name", &self.name())
            .field("size", &self.size())
            .finish_non_exhaustive()
    }
}

impl UniformSource for Generator {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.state.next_uniform()
    }
}

/// Words are derived from the unit-interval stream, so every algorithm fills
/// all 32 bits regardless of its raw range.
impl RngCore for Generator {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next_uniform() * TWO_POW_32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_u32());
        let hi = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let word = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{self, MT19937, RANLXD2};
    use rand::Rng;

    #[test]
    fn test_allocate_uses_default_seed() {
        let mut defaulted = Generator::allocate(&RANLXD2).unwrap();
        let mut explicit = Generator::allocate_seeded(&RANLXD2, DEFAULT_SEED).unwrap();
        for _ in 0..100 {
            assert_eq!(defaulted.next_raw(), explicit.next_raw());
        }
    }

    #[test]
    fn test_queries_forward_descriptor() {
        for d in descriptor::all() {
            let rng = Generator::allocate(d).unwrap();
            assert_eq!(rng.name(), d.name());
            assert_eq!(rng.size(), d.size());
            assert_eq!(rng.min(), d.min());
            assert_eq!(rng.max(), d.max());
            assert!(std::ptr::eq(rng.descriptor(), *d));
        }
    }

    #[test]
    fn test_seed_overwrites_position() {
        let mut rng = Generator::allocate(&MT19937).unwrap();
        rng.seed(10);
        let first: Vec<u64> = (0..10).map(|_| rng.next_raw()).collect();
        for _ in 0..1_000 {
            rng.next_raw();
        }
        rng.seed(10);
        let again: Vec<u64> = (0..10).map(|_| rng.next_raw()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_next_u32_matches_raw_for_full_range_algorithms() {
        for d in descriptor::all() {
            let mut a = Generator::allocate(d).unwrap();
            let mut b = Generator::allocate(d).unwrap();
            for _ in 0..200 {
                assert_eq!(u64::from(a.next_u32()), b.next_raw(), "{}", d);
            }
        }
    }

    #[test]
    fn test_fill_bytes_partial_chunk() {
        let mut a = Generator::allocate(&RANLXD2).unwrap();
        let mut b = Generator::allocate(&RANLXD2).unwrap();
        let mut buf = [0u8; 7];
        a.fill_bytes(&mut buf);

        let w0 = b.next_u32().to_le_bytes();
        let w1 = b.next_u32().to_le_bytes();
        assert_eq!(&buf[..4], &w0);
        assert_eq!(&buf[4..], &w1[..3]);
    }

    #[test]
    fn test_drives_rand_api() {
        let mut rng = Generator::allocate(&MT19937).unwrap();
        for _ in 0..1_000 {
            let x: u8 = rng.gen_range(1..=6);
            assert!((1..=6).contains(&x));
        }
    }

    #[test]
    fn test_debug_shows_name() {
        let rng = Generator::allocate(&RANLXD2).unwrap();
        assert!(format!("{:?}", rng).contains("ranlxd2"));
    }
}
