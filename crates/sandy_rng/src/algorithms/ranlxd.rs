//! RANLUX double-precision generator.
//!
//! Lüscher's subtract-with-borrow lagged Fibonacci generator with lags
//! (24, 10) reformulated on 48-bit fractions, twelve doubles per cycle.
//! Decorrelation comes from discarding part of the sequence: after each
//! block of 12 outputs the generator advances `p` steps, where `p` is set by
//! the luxury level.
//!
//! # References
//!
//! - Lüscher, M. (1994). "A portable high-quality random number generator for
//!   lattice field theory simulations". Computer Physics Communications 79.

use super::RngAlgorithm;

/// Successor index in the 12-element ring.
const NEXT: [usize; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 0];

/// 2^-48, the resolution of every output.
const ONE_BIT: f64 = 1.0 / 281_474_976_710_656.0;

/// 2^32, scale from unit-interval output to raw integer output.
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Luxury level: how many steps are taken per 12 delivered values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Luxury {
    /// 202 steps per block.
    Level1,
    /// 397 steps per block.
    Level2,
}

impl Luxury {
    /// Number of generator steps per block of 12 outputs.
    #[inline]
    pub const fn steps(self) -> usize {
        match self {
            Luxury::Level1 => 202,
            Luxury::Level2 => 397,
        }
    }
}

/// RANLUX double-precision state.
///
/// Raw output spans `[0, 2^32 - 1]`; unit-interval output is a multiple of
/// 2^-48 in `[0, 1)` and may be exactly zero.
///
/// Only the low 31 bits of a seed are used; seeds differing only above bit 30
/// produce the same stream. Seed 0 is mapped to 1.
#[derive(Clone, Debug, PartialEq)]
pub struct Ranluxd {
    xdbl: [f64; 12],
    carry: f64,
    ir: usize,
    jr: usize,
    ir_old: usize,
    pr: usize,
    luxury: Luxury,
}

/// Folds a negative difference back into `[0, 1)`, returning the new borrow.
#[inline]
fn wrap(y: f64) -> (f64, f64) {
    if y < 0.0 {
        (y + 1.0, ONE_BIT)
    } else {
        (y, 0.0)
    }
}

impl Ranluxd {
    /// Returns an all-zero state. It must be seeded before drawing.
    pub fn zeroed(luxury: Luxury) -> Self {
        Self {
            xdbl: [0.0; 12],
            carry: 0.0,
            ir: 0,
            jr: 0,
            ir_old: 0,
            pr: 0,
            luxury,
        }
    }

    /// Returns the luxury level this state was built for.
    #[inline]
    pub fn luxury(&self) -> Luxury {
        self.luxury
    }

    /// Single lagged subtract-with-borrow step at the ring position `ir`.
    #[inline]
    fn step(&mut self, ir: usize, jr: usize, carry: f64) -> f64 {
        let (value, borrow) = wrap(self.xdbl[jr] - self.xdbl[ir] - carry);
        self.xdbl[ir] = value;
        borrow
    }

    /// Advances the ring by `pr` steps.
    ///
    /// Steps are taken one at a time until the ring index wraps to zero, then
    /// in unrolled blocks of 12, then one at a time for the remainder.
    fn increment_state(&mut self) {
        let mut carry = self.carry;
        let mut ir = self.ir;
        let mut jr = self.jr;
        let pr = self.pr;
        let mut k = 0;

        while ir > 0 && k < pr {
            carry = self.step(ir, jr, carry);
            ir = NEXT[ir];
            jr = NEXT[jr];
            k += 1;
        }

        // Full cycles starting at ir = 0, jr = 7.
        while k + 12 <= pr {
            let mut current = self.xdbl[7] - self.xdbl[0] - carry;
            for i in 0..11 {
                let mut next = self.xdbl[(i + 8) % 12] - self.xdbl[(i + 1) % 12];
                if current < 0.0 {
                    next -= ONE_BIT;
                    current += 1.0;
                }
                self.xdbl[i] = current;
                current = next;
            }
            let (value, borrow) = wrap(current);
            self.xdbl[11] = value;
            carry = borrow;
            k += 12;
        }

        while k < pr {
            carry = self.step(ir, jr, carry);
            ir = NEXT[ir];
            jr = NEXT[jr];
            k += 1;
        }

        self.ir = ir;
        self.ir_old = ir;
        self.jr = jr;
        self.carry = carry;
    }
}

impl RngAlgorithm for Ranluxd {
    fn seed(&mut self, seed: u64) {
        let seed = if seed == 0 { 1 } else { seed };

        let mut bits = seed & 0x7fff_ffff;
        let mut xbit = [0u8; 31];
        for bit in xbit.iter_mut() {
            *bit = (bits % 2) as u8;
            bits /= 2;
        }

        let mut ibit = 0;
        let mut jbit = 18;
        for value in self.xdbl.iter_mut() {
            let mut x = 0.0;
            for _ in 0..48 {
                let y = f64::from((xbit[ibit] + 1) % 2);
                x += x + y;
                xbit[ibit] = (xbit[ibit] + xbit[jbit]) % 2;
                ibit = (ibit + 1) % 31;
                jbit = (jbit + 1) % 31;
            }
            *value = ONE_BIT * x;
        }

        self.carry = 0.0;
        self.ir = 11;
        self.jr = 7;
        self.ir_old = 0;
        self.pr = self.luxury.steps();
    }

    #[inline]
    fn next_raw(&mut self) -> u64 {
        (self.next_uniform() * TWO_POW_32) as u64
    }

    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.ir = NEXT[self.ir];
        if self.ir == self.ir_old {
            self.increment_state();
        }
        self.xdbl[self.ir]
    }
}
