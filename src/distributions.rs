//! Named probability distributions.
//!
//! Each type validates its parameters on construction and implements
//! [`Distribution`]: density (or mass) function, CDF, sampling, and the
//! theoretical first two moments used by the experiment harness.
//!
//! # Supported Distributions
//!
//! | Distribution | Parameters | Support | Mean | Variance |
//! |---|---|---|---|---|
//! | [`Bernoulli`] | p | {0, 1} | p | p(1−p) |
//! | [`Binomial`] | n, p | {0..n} | np | np(1−p) |
//! | [`Poisson`] | λ | ℕ | λ | λ |
//! | [`Geometric`] | p | {1, 2, ...} | 1/p | (1−p)/p² |
//! | [`Uniform`] | a, b | [a, b] | (a+b)/2 | (b−a)²/12 |
//! | [`Normal`] | μ, σ | ℝ | μ | σ² |
//! | [`Exponential`] | λ | [0, ∞) | 1/λ | 1/λ² |
//! | [`Laplace`] | μ, b | ℝ | μ | 2b² |
//! | [`Cauchy`] | x₀, γ | ℝ | undefined | undefined |
//!
//! Undefined moments are reported as `NaN`.
//!
//! # Sampling
//!
//! Samplers take `&mut dyn RngCore` so the trait stays object-safe and
//! distributions can be boxed. Continuous laws use inverse-transform
//! sampling (Box–Muller for the normal); discrete laws count Bernoulli
//! successes or exponential inter-arrival times, and large Poisson rates
//! use PTRS rejection.

use std::f64::consts::PI;

use rand::{Rng, RngCore};
use thiserror::Error;

use crate::special::{erf, ln_gamma, standard_normal_pdf};

/// Distance from an integer still treated as that integer by discrete
/// mass functions.
const INTEGER_TOLERANCE: f64 = 1e-9;

/// Rate from which Poisson sampling uses PTRS instead of counting arrivals.
const POISSON_PTRS_THRESHOLD: f64 = 10.0;

/// Largest rate whose Poisson CDF is summed term by term.
const POISSON_SUM_LIMIT: f64 = 1e6;

/// Error type for invalid distribution parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    /// Parameters violate distribution constraints.
    #[error("invalid distribution parameters: {0}")]
    InvalidParameters(String),
}

/// Common interface of every distribution.
pub trait Distribution {
    /// Density for continuous laws, mass for discrete ones.
    fn pdf(&self, x: f64) -> f64;

    /// `P(X ≤ x)`.
    fn cdf(&self, x: f64) -> f64;

    /// Draws one value.
    fn sample(&self, rng: &mut dyn RngCore) -> f64;

    /// `E[X]`, or `NaN` if undefined.
    fn theoretical_mean(&self) -> f64;

    /// `Var[X]`, or `NaN` if undefined.
    fn theoretical_variance(&self) -> f64;
}

impl<D: Distribution + ?Sized> Distribution for &D {
    fn pdf(&self, x: f64) -> f64 {
        (**self).pdf(x)
    }
    fn cdf(&self, x: f64) -> f64 {
        (**self).cdf(x)
    }
    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        (**self).sample(rng)
    }
    fn theoretical_mean(&self) -> f64 {
        (**self).theoretical_mean()
    }
    fn theoretical_variance(&self) -> f64 {
        (**self).theoretical_variance()
    }
}

impl<D: Distribution + ?Sized> Distribution for Box<D> {
    fn pdf(&self, x: f64) -> f64 {
        (**self).pdf(x)
    }
    fn cdf(&self, x: f64) -> f64 {
        (**self).cdf(x)
    }
    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        (**self).sample(rng)
    }
    fn theoretical_mean(&self) -> f64 {
        (**self).theoretical_mean()
    }
    fn theoretical_variance(&self) -> f64 {
        (**self).theoretical_variance()
    }
}

fn invalid(msg: String) -> DistributionError {
    DistributionError::InvalidParameters(msg)
}

fn check_probability(name: &str, p: f64) -> Result<(), DistributionError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(invalid(format!("{name} requires p in [0, 1], got p={p}")));
    }
    Ok(())
}

fn check_positive(name: &str, param: &str, value: f64) -> Result<(), DistributionError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(format!(
            "{name} requires finite {param} > 0, got {param}={value}"
        )));
    }
    Ok(())
}

fn check_finite(name: &str, param: &str, value: f64) -> Result<(), DistributionError> {
    if !value.is_finite() {
        return Err(invalid(format!(
            "{name} requires finite {param}, got {param}={value}"
        )));
    }
    Ok(())
}

/// `x` as a non-negative integer, if it is one within tolerance.
fn as_count(x: f64) -> Option<u64> {
    let k = x.round();
    if k < 0.0 || (x - k).abs() > INTEGER_TOLERANCE {
        return None;
    }
    Some(k as u64)
}

/// Uniform draw on `(0, 1]`, safe to pass to `ln`.
fn open_unit(rng: &mut dyn RngCore) -> f64 {
    1.0 - rng.random::<f64>()
}

// ============================================================================
// Bernoulli
// ============================================================================

/// Single trial with success probability `p`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bernoulli {
    p: f64,
}

impl Bernoulli {
    /// # Errors
    /// Returns `Err` unless `0 ≤ p ≤ 1`.
    pub fn new(p: f64) -> Result<Self, DistributionError> {
        check_probability("Bernoulli", p)?;
        Ok(Self { p })
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Distribution for Bernoulli {
    fn pdf(&self, x: f64) -> f64 {
        match as_count(x) {
            Some(0) => 1.0 - self.p,
            Some(1) => self.p,
            _ => 0.0,
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            0.0
        } else if x < 1.0 {
            1.0 - self.p
        } else {
            1.0
        }
    }

    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        if rng.random::<f64>() < self.p {
            1.0
        } else {
            0.0
        }
    }

    fn theoretical_mean(&self) -> f64 {
        self.p
    }

    fn theoretical_variance(&self) -> f64 {
        self.p * (1.0 - self.p)
    }
}

// ============================================================================
// Binomial
// ============================================================================

/// Number of successes in `n` independent Bernoulli(`p`) trials.
///
/// # Mathematical Definition
/// - PMF: C(n,k) pᵏ (1−p)ⁿ⁻ᵏ, evaluated in log space via ln Γ
#[derive(Debug, Clone, PartialEq)]
pub struct Binomial {
    n: u32,
    p: f64,
}

impl Binomial {
    /// # Errors
    /// Returns `Err` unless `0 ≤ p ≤ 1`.
    pub fn new(n: u32, p: f64) -> Result<Self, DistributionError> {
        check_probability("Binomial", p)?;
        Ok(Self { n, p })
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    fn mass(&self, k: u64) -> f64 {
        let n = u64::from(self.n);
        if k > n {
            return 0.0;
        }
        // Degenerate p would put 0·ln(0) into the log-space formula.
        if self.p == 0.0 {
            return if k == 0 { 1.0 } else { 0.0 };
        }
        if self.p == 1.0 {
            return if k == n { 1.0 } else { 0.0 };
        }
        let (n, k) = (n as f64, k as f64);
        let log_coeff = ln_gamma(n + 1.0) - ln_gamma(k + 1.0) - ln_gamma(n - k + 1.0);
        (log_coeff + k * self.p.ln() + (n - k) * (1.0 - self.p).ln()).exp()
    }
}

impl Distribution for Binomial {
    fn pdf(&self, x: f64) -> f64 {
        as_count(x).map_or(0.0, |k| self.mass(k))
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        if x >= f64::from(self.n) {
            return 1.0;
        }
        (0..=x.floor() as u64).map(|k| self.mass(k)).sum()
    }

    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        (0..self.n).filter(|_| rng.random::<f64>() < self.p).count() as f64
    }

    fn theoretical_mean(&self) -> f64 {
        f64::from(self.n) * self.p
    }

    fn theoretical_variance(&self) -> f64 {
        f64::from(self.n) * self.p * (1.0 - self.p)
    }
}

// ============================================================================
// Poisson
// ============================================================================

/// Count of events in a unit interval at rate `λ`.
#[derive(Debug, Clone, PartialEq)]
pub struct Poisson {
    lambda: f64,
}

impl Poisson {
    /// # Errors
    /// Returns `Err` unless `λ` is finite and positive.
    pub fn new(lambda: f64) -> Result<Self, DistributionError> {
        check_positive("Poisson", "lambda", lambda)?;
        Ok(Self { lambda })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    fn mass(&self, k: u64) -> f64 {
        let k = k as f64;
        (k * self.lambda.ln() - self.lambda - ln_gamma(k + 1.0)).exp()
    }

    /// Transformed rejection with squeeze; expected iterations stay
    /// bounded for every `λ ≥ 10`.
    fn sample_ptrs(&self, rng: &mut dyn RngCore) -> f64 {
        let lambda = self.lambda;
        let ln_lambda = lambda.ln();
        let b = 0.931 + 2.53 * lambda.sqrt();
        let a = -0.059 + 0.02483 * b;
        let ln_inv_alpha = (1.1239 + 1.1328 / (b - 3.4)).ln();
        let v_r = 0.9277 - 3.6224 / (b - 2.0);
        loop {
            let u = rng.random::<f64>() - 0.5;
            let v = open_unit(rng);
            let us = 0.5 - u.abs();
            let k = ((2.0 * a / us + b) * u + lambda + 0.43).floor();
            if us >= 0.07 && v <= v_r {
                return k;
            }
            if k < 0.0 || (us < 0.013 && v > us) {
                continue;
            }
            let lhs = v.ln() + ln_inv_alpha - (a / (us * us) + b).ln();
            if lhs <= -lambda + k * ln_lambda - ln_gamma(k + 1.0) {
                return k;
            }
        }
    }
}

impl Distribution for Poisson {
    fn pdf(&self, x: f64) -> f64 {
        as_count(x).map_or(0.0, |k| self.mass(k))
    }

    /// Sums the mass inside `λ ± 12√λ + 12`; outside that window the
    /// remaining tail is below double precision. Above `λ = 10⁶` it
    /// switches to the Wilson–Hilferty approximation of the equivalent
    /// chi-square tail.
    fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x < 0.0 {
            return 0.0;
        }
        let spread = 12.0 * self.lambda.sqrt() + 12.0;
        let k = x.floor();
        if k >= self.lambda + spread {
            return 1.0;
        }
        let lo = (self.lambda - spread).max(0.0).floor();
        if k < lo {
            return 0.0;
        }
        if self.lambda > POISSON_SUM_LIMIT {
            let m = k + 1.0;
            let z = 3.0 * m.sqrt() * ((self.lambda / m).cbrt() - 1.0 + 1.0 / (9.0 * m));
            return (0.5 * (1.0 - erf(z / std::f64::consts::SQRT_2))).clamp(0.0, 1.0);
        }
        let total: f64 = (lo as u64..=k as u64).map(|i| self.mass(i)).sum();
        total.min(1.0)
    }

    /// Counts unit-rate exponential arrivals before time `λ` for small
    /// rates, PTRS (Hörmann 1993) rejection from `λ = 10` on.
    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        if self.lambda >= POISSON_PTRS_THRESHOLD {
            return self.sample_ptrs(rng);
        }
        let mut elapsed = 0.0;
        let mut count = 0u64;
        loop {
            elapsed -= open_unit(rng).ln();
            if elapsed > self.lambda {
                return count as f64;
            }
            count += 1;
        }
    }

    fn theoretical_mean(&self) -> f64 {
        self.lambda
    }

    fn theoretical_variance(&self) -> f64 {
        self.lambda
    }
}

// ============================================================================
// Geometric
// ============================================================================

/// Trial index of the first success, supported on `{1, 2, ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometric {
    p: f64,
}

impl Geometric {
    /// # Errors
    /// Returns `Err` unless `0 < p ≤ 1`.
    pub fn new(p: f64) -> Result<Self, DistributionError> {
        if !(p > 0.0 && p <= 1.0) {
            return Err(invalid(format!("Geometric requires p in (0, 1], got p={p}")));
        }
        Ok(Self { p })
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Distribution for Geometric {
    fn pdf(&self, x: f64) -> f64 {
        match as_count(x) {
            Some(k) if k >= 1 => (1.0 - self.p).powf((k - 1) as f64) * self.p,
            _ => 0.0,
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < 1.0 {
            return 0.0;
        }
        1.0 - (1.0 - self.p).powf(x.floor())
    }

    /// Inverse transform: ⌈ln U / ln(1−p)⌉.
    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        if self.p == 1.0 {
            return 1.0;
        }
        let u = open_unit(rng);
        (u.ln() / (1.0 - self.p).ln()).ceil().max(1.0)
    }

    fn theoretical_mean(&self) -> f64 {
        1.0 / self.p
    }

    fn theoretical_variance(&self) -> f64 {
        (1.0 - self.p) / (self.p * self.p)
    }
}

// ============================================================================
// Uniform
// ============================================================================

/// Continuous uniform distribution on `[a, b]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Uniform {
    a: f64,
    b: f64,
}

impl Uniform {
    /// # Errors
    /// Returns `Err` if `a >= b` or either bound is not finite.
    pub fn new(a: f64, b: f64) -> Result<Self, DistributionError> {
        if !a.is_finite() || !b.is_finite() || a >= b {
            return Err(invalid(format!(
                "Uniform requires a < b, got a={a}, b={b}"
            )));
        }
        Ok(Self { a, b })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }
}

impl Distribution for Uniform {
    fn pdf(&self, x: f64) -> f64 {
        if (self.a..=self.b).contains(&x) {
            1.0 / (self.b - self.a)
        } else {
            0.0
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        ((x - self.a) / (self.b - self.a)).clamp(0.0, 1.0)
    }

    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        self.a + (self.b - self.a) * rng.random::<f64>()
    }

    fn theoretical_mean(&self) -> f64 {
        (self.a + self.b) / 2.0
    }

    fn theoretical_variance(&self) -> f64 {
        let range = self.b - self.a;
        range * range / 12.0
    }
}

// ============================================================================
// Normal
// ============================================================================

/// Normal distribution N(μ, σ²).
///
/// # Mathematical Definition
/// - CDF: ½(1 + erf((x−μ)/(σ√2)))
#[derive(Debug, Clone, PartialEq)]
pub struct Normal {
    mu: f64,
    sigma: f64,
}

impl Normal {
    /// # Errors
    /// Returns `Err` if `σ ≤ 0` or a parameter is not finite.
    pub fn new(mu: f64, sigma: f64) -> Result<Self, DistributionError> {
        check_finite("Normal", "mu", mu)?;
        check_positive("Normal", "sigma", sigma)?;
        Ok(Self { mu, sigma })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Distribution for Normal {
    fn pdf(&self, x: f64) -> f64 {
        standard_normal_pdf((x - self.mu) / self.sigma) / self.sigma
    }

    fn cdf(&self, x: f64) -> f64 {
        0.5 * (1.0 + erf((x - self.mu) / (self.sigma * std::f64::consts::SQRT_2)))
    }

    /// Box–Muller transform.
    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        let radius = (-2.0 * open_unit(rng).ln()).sqrt();
        let angle = 2.0 * PI * rng.random::<f64>();
        self.mu + self.sigma * radius * angle.cos()
    }

    fn theoretical_mean(&self) -> f64 {
        self.mu
    }

    fn theoretical_variance(&self) -> f64 {
        self.sigma * self.sigma
    }
}

// ============================================================================
// Exponential
// ============================================================================

/// Exponential distribution with rate `λ`.
#[derive(Debug, Clone, PartialEq)]
pub struct Exponential {
    lambda: f64,
}

impl Exponential {
    /// # Errors
    /// Returns `Err` unless `λ` is finite and positive.
    pub fn new(lambda: f64) -> Result<Self, DistributionError> {
        check_positive("Exponential", "lambda", lambda)?;
        Ok(Self { lambda })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl Distribution for Exponential {
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            0.0
        } else {
            self.lambda * (-self.lambda * x).exp()
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            0.0
        } else {
            1.0 - (-self.lambda * x).exp()
        }
    }

    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        -open_unit(rng).ln() / self.lambda
    }

    fn theoretical_mean(&self) -> f64 {
        1.0 / self.lambda
    }

    fn theoretical_variance(&self) -> f64 {
        1.0 / (self.lambda * self.lambda)
    }
}

// ============================================================================
// Laplace
// ============================================================================

/// Double-exponential distribution with location `μ` and scale `b`.
#[derive(Debug, Clone, PartialEq)]
pub struct Laplace {
    mu: f64,
    b: f64,
}

impl Laplace {
    /// # Errors
    /// Returns `Err` if `b ≤ 0` or a parameter is not finite.
    pub fn new(mu: f64, b: f64) -> Result<Self, DistributionError> {
        check_finite("Laplace", "mu", mu)?;
        check_positive("Laplace", "b", b)?;
        Ok(Self { mu, b })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn b(&self) -> f64 {
        self.b
    }
}

impl Distribution for Laplace {
    fn pdf(&self, x: f64) -> f64 {
        (-(x - self.mu).abs() / self.b).exp() / (2.0 * self.b)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < self.mu {
            0.5 * ((x - self.mu) / self.b).exp()
        } else {
            1.0 - 0.5 * (-(x - self.mu) / self.b).exp()
        }
    }

    /// Inverse transform on `u ∈ [−½, ½)`.
    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        let u = rng.random::<f64>() - 0.5;
        let sign = if u < 0.0 { -1.0 } else { 1.0 };
        // 1 − 2|u| lies in (0, 1], so the log is finite.
        self.mu - self.b * sign * (1.0 - 2.0 * u.abs()).ln()
    }

    fn theoretical_mean(&self) -> f64 {
        self.mu
    }

    fn theoretical_variance(&self) -> f64 {
        2.0 * self.b * self.b
    }
}

// ============================================================================
// Cauchy
// ============================================================================

/// Cauchy distribution with location `x₀` and scale `γ`. Has no mean and
/// no variance.
#[derive(Debug, Clone, PartialEq)]
pub struct Cauchy {
    x0: f64,
    gamma: f64,
}

impl Cauchy {
    /// # Errors
    /// Returns `Err` if `γ ≤ 0` or a parameter is not finite.
    pub fn new(x0: f64, gamma: f64) -> Result<Self, DistributionError> {
        check_finite("Cauchy", "x0", x0)?;
        check_positive("Cauchy", "gamma", gamma)?;
        Ok(Self { x0, gamma })
    }

    pub fn x0(&self) -> f64 {
        self.x0
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl Distribution for Cauchy {
    fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.x0) / self.gamma;
        1.0 / (PI * self.gamma * (1.0 + z * z))
    }

    fn cdf(&self, x: f64) -> f64 {
        ((x - self.x0) / self.gamma).atan() / PI + 0.5
    }

    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        self.x0 + self.gamma * (PI * (rng.random::<f64>() - 0.5)).tan()
    }

    fn theoretical_mean(&self) -> f64 {
        f64::NAN
    }

    fn theoretical_variance(&self) -> f64 {
        f64::NAN
    }
}

// ============================================================================
// Tests
// ============================================================================
