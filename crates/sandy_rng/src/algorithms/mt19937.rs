//! Mersenne Twister (MT19937).
//!
//! 32-bit generator with period 2^19937 - 1, seeded with the 2002 revision of
//! the initialisation routine. Seed 0 is mapped to 4357.

use std::collections::TryReserveError;

use super::RngAlgorithm;

const N: usize = 624;
const M: usize = 397;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;
const MATRIX_A: u32 = 0x9908_b0df;

/// Mersenne Twister state.
///
/// The 624-word table lives on the heap and is reserved fallibly, so
/// construction reports allocation failure instead of aborting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mt19937 {
    mt: Vec<u32>,
    mti: usize,
}

impl Mt19937 {
    /// Bytes of generator state: the word table plus the table index.
    pub const STATE_SIZE: usize = N * std::mem::size_of::<u32>() + std::mem::size_of::<usize>();

    /// Reserves a zeroed, unseeded state.
    ///
    /// # Errors
    ///
    /// Returns the reservation error if the word table cannot be allocated.
    pub fn try_zeroed() -> Result<Self, TryReserveError> {
        let mut mt = Vec::new();
        mt.try_reserve_exact(N)?;
        mt.resize(N, 0);
        Ok(Self { mt, mti: N + 1 })
    }

    /// Regenerates the whole table.
    fn twist(&mut self) {
        let mt = &mut self.mt;
        for kk in 0..N {
            let y = (mt[kk] & UPPER_MASK) | (mt[(kk + 1) % N] & LOWER_MASK);
            let magic = if y & 1 == 1 { MATRIX_A } else { 0 };
            mt[kk] = mt[(kk + M) % N] ^ (y >> 1) ^ magic;
        }
        self.mti = 0;
    }
}

impl RngAlgorithm for Mt19937 {
    fn seed(&mut self, seed: u64) {
        let seed = if seed == 0 { 4357 } else { seed };

        self.mt[0] = (seed & 0xffff_ffff) as u32;
        for i in 1..N {
            let prev = self.mt[i - 1];
            self.mt[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        self.mti = N;
    }

    #[inline]
    fn next_raw(&mut self) -> u64 {
        if self.mti >= N {
            self.twist();
        }

        let mut k = self.mt[self.mti];
        k ^= k >> 11;
        k ^= (k << 7) & 0x9d2c_5680;
        k ^= (k << 15) & 0xefc6_0000;
        k ^= k >> 18;

        self.mti += 1;
        u64::from(k)
    }

    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.next_raw() as f64 / 4_294_967_296.0
    }
}
