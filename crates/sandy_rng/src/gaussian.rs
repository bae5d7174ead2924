//! Gaussian samplers and the normal density.
//!
//! Two independent samplers turn a [`UniformSource`] into normal deviates
//! with mean 0 and standard deviation `sigma`:
//!
//! - [`gaussian`]: polar Box-Muller (Marsaglia's polar method). Draws pairs
//!   of positive uniforms until the point lies inside the unit disc; on
//!   average 4/π pairs per output.
//! - [`gaussian_ratio_method`]: Kinderman-Monahan ratio-of-uniforms with
//!   Leva's quadratic pre-tests; on average 1.369 pairs per output.
//!
//! Both consume the stream in a fixed order, so for a given algorithm and
//! seed the output sequence is bit-reproducible.
//!
//! `sigma` is a plain scale factor and is not validated: `sigma = 0` returns
//! zero, a negative `sigma` mirrors the distribution.
//!
//! # References
//!
//! - Knuth, D. E. *The Art of Computer Programming*, Vol. 2, 3.4.1 (polar method).
//! - Kinderman, A. J. & Monahan, J. F. (1977). "Computer generation of random
//!   variables using the ratio of uniform deviates". ACM TOMS 3.
//! - Leva, J. L. (1992). "A fast normal random number generator". ACM TOMS 18.

use num_traits::{Float, FloatConst};
use rand::Rng;
use rand_distr::Distribution;

use crate::uniform::{RandSource, UniformSource};

// Leva's bounding constants for the ratio-of-uniforms acceptance region.
const LEVA_S: f64 = 0.449871;
const LEVA_T: f64 = -0.386595;
const LEVA_A: f64 = 0.19600;
const LEVA_B: f64 = 0.25472;
const LEVA_R1: f64 = 0.27597;
const LEVA_R2: f64 = 0.27846;

/// Half-width scale for v: slightly above sqrt(8/e).
const V_SCALE: f64 = 1.7156;

/// Draws a normal deviate with standard deviation `sigma` (polar method).
///
/// # Examples
///
/// ```rust
/// use sandy_rng::{descriptor, gaussian::gaussian, Generator};
///
/// let mut rng = Generator::allocate(&descriptor::RANLXD2).unwrap();
/// let z = gaussian(&mut rng, 2.0);
/// assert!(z.is_finite());
/// ```
pub fn gaussian<S: UniformSource + ?Sized>(source: &mut S, sigma: f64) -> f64 {
    loop {
        // Point in the square (-1, 1) x (-1, 1)
        let x = -1.0 + 2.0 * source.next_uniform_positive();
        let y = -1.0 + 2.0 * source.next_uniform_positive();

        let r2 = x * x + y * y;
        if r2 <= 1.0 && r2 != 0.0 {
            return sigma * y * (-2.0 * r2.ln() / r2).sqrt();
        }
    }
}

/// Draws a normal deviate with standard deviation `sigma` (ratio of uniforms).
pub fn gaussian_ratio_method<S: UniformSource + ?Sized>(source: &mut S, sigma: f64) -> f64 {
    loop {
        // u in (0, 1] avoids the singularity at u = 0
        let u = 1.0 - source.next_uniform();

        // v in [-0.5, 0.5) scaled to cover the K+M region
        let v = (source.next_uniform() - 0.5) * V_SCALE;

        let x = u - LEVA_S;
        let y = v.abs() - LEVA_T;
        let q = x * x + y * (LEVA_A * y - LEVA_B * x);

        // Inner bound accepts, outer bound rejects; the exact test runs rarely.
        let accept = q < LEVA_R1 || (q <= LEVA_R2 && v * v <= -4.0 * u * u * u.ln());
        if accept {
            return sigma * (v / u);
        }
    }
}

/// Unit-variance form of [`gaussian`].
#[inline]
pub fn ugaussian<S: UniformSource + ?Sized>(source: &mut S) -> f64 {
    gaussian(source, 1.0)
}

/// Unit-variance form of [`gaussian_ratio_method`].
#[inline]
pub fn ugaussian_ratio_method<S: UniformSource + ?Sized>(source: &mut S) -> f64 {
    gaussian_ratio_method(source, 1.0)
}

/// Normal density with mean 0 and standard deviation `sigma`.
///
/// Computes `1 / (sqrt(2π)|σ|) · exp(-(x/|σ|)² / 2)`. The sign of `sigma` is
/// ignored. `sigma = 0` yields NaN for every `x` under IEEE arithmetic.
///
/// # Examples
/// ```
/// use sandy_rng::gaussian_pdf;
///
/// let p = gaussian_pdf(0.0_f64, 1.0);
/// assert!((p - 0.3989422804).abs() < 1e-9);
/// assert!(gaussian_pdf(1.0_f64, 0.0).is_nan());
/// ```
#[inline]
pub fn gaussian_pdf<T: Float + FloatConst>(x: T, sigma: T) -> T {
    let sigma = sigma.abs();
    let two = T::one() + T::one();
    let u = x / sigma;
    (T::one() / ((two * T::PI()).sqrt() * sigma)) * (-u * u / two).exp()
}

/// Standard normal density.
#[inline]
pub fn ugaussian_pdf<T: Float + FloatConst>(x: T) -> T {
    gaussian_pdf(x, T::one())
}

/// Sampling algorithm used by [`Gaussian`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GaussianMethod {
    /// Polar Box-Muller, see [`gaussian`].
    #[default]
    Polar,
    /// Ratio of uniforms, see [`gaussian_ratio_method`].
    RatioOfUniforms,
}

/// Normal distribution with mean 0, usable with any `rand` generator.
///
/// # Examples
///
/// ```rust
/// use rand_distr::Distribution;
/// use sandy_rng::{descriptor, Gaussian, GaussianMethod, Generator};
///
/// let dist = Gaussian::new(0.5, GaussianMethod::RatioOfUniforms);
/// let mut rng = Generator::allocate(&descriptor::MT19937).unwrap();
/// let z: f64 = dist.sample(&mut rng);
/// assert!(z.is_finite());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gaussian {
    sigma: f64,
    method: GaussianMethod,
}

impl Gaussian {
    /// Creates a distribution with standard deviation `sigma`.
    #[inline]
    pub fn new(sigma: f64, method: GaussianMethod) -> Self {
        Self { sigma, method }
    }

    /// Unit-variance distribution.
    #[inline]
    pub fn standard(method: GaussianMethod) -> Self {
        Self::new(1.0, method)
    }

    /// Standard deviation.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Sampling algorithm.
    #[inline]
    pub fn method(&self) -> GaussianMethod {
        self.method
    }

    /// Density at `x`.
    #[inline]
    pub fn pdf(&self, x: f64) -> f64 {
        gaussian_pdf(x, self.sigma)
    }

    /// Draws one deviate from a [`UniformSource`].
    #[inline]
    pub fn sample_from<S: UniformSource + ?Sized>(&self, source: &mut S) -> f64 {
        match self.method {
            GaussianMethod::Polar => gaussian(source, self.sigma),
            GaussianMethod::RatioOfUniforms => gaussian_ratio_method(source, self.sigma),
        }
    }
}

impl Distribution<f64> for Gaussian {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sample_from(&mut RandSource::new(rng))
    }
}
