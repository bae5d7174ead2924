//! Uniform stream abstraction consumed by the samplers.
//!
//! [`UniformSource`] is the minimal interface the Gaussian samplers need: a
//! stream of doubles in `[0, 1)`. [`Generator`](crate::Generator) implements
//! it directly; [`RandSource`] adapts any [`rand::Rng`].

use rand::Rng;

/// A stream of uniform deviates on `[0, 1)`.
pub trait UniformSource {
    /// Draws the next double in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// Draws the next double in `(0, 1)`.
    ///
    /// Redraws while the stream yields exactly `0.0`. There is no retry
    /// limit; for any non-degenerate stream the loop terminates almost surely.
    #[inline]
    fn next_uniform_positive(&mut self) -> f64 {
        loop {
            let x = self.next_uniform();
            if x != 0.0 {
                return x;
            }
        }
    }
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }

    #[inline]
    fn next_uniform_positive(&mut self) -> f64 {
        (**self).next_uniform_positive()
    }
}

/// Adapter presenting a [`rand::Rng`] as a [`UniformSource`].
///
/// # Examples
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use sandy_rng::{gaussian, RandSource};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let z = gaussian::ugaussian(&mut RandSource::new(&mut rng));
/// assert!(z.is_finite());
/// ```
#[derive(Debug)]
pub struct RandSource<'a, R: ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> RandSource<'a, R> {
    /// Wraps a mutable borrow of `rng`.
    #[inline]
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + ?Sized> UniformSource for RandSource<'_, R> {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Replays a fixed script of values.
    struct Scripted {
        values: Vec<f64>,
        pos: usize,
    }

    impl UniformSource for Scripted {
        fn next_uniform(&mut self) -> f64 {
            let v = self.values[self.pos];
            self.pos += 1;
            v
        }
    }

    #[test]
    fn test_positive_skips_exact_zeros() {
        let mut source = Scripted {
            values: vec![0.0, 0.0, 0.25, 0.0, 0.5],
            pos: 0,
        };
        assert_eq!(source.next_uniform_positive(), 0.25);
        assert_eq!(source.pos, 3);
        assert_eq!(source.next_uniform_positive(), 0.5);
        assert_eq!(source.pos, 5);
    }

    #[test]
    fn test_rand_source_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut source = RandSource::new(&mut rng);
        for _ in 0..10_000 {
            let u = source.next_uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut source = Scripted {
            values: vec![0.0, 0.75],
            pos: 0,
        };
        fn draw<S: UniformSource>(mut s: S) -> f64 {
            s.next_uniform_positive()
        }
        assert_eq!(draw(&mut source), 0.75);
        assert_eq!(source.pos, 2);
    }
}
