//! Descriptive statistics used by measures, random variables and the
//! experiment harness.
//!
//! # Algorithms
//!
//! - **Sums**: Neumaier compensated summation, so totals of many small
//!   atomic probabilities stay within O(ε) of the exact value.
//!   Reference: Neumaier (1974), *ZAMM* 54(1), pp. 39–51.
//! - **Streaming mean/variance**: Welford's online algorithm.
//!   Reference: Welford (1962), *Technometrics* 4(3), pp. 419–420.

/// Neumaier compensated sum.
///
/// # Complexity
/// Time: O(n), Space: O(1)
///
/// # Examples
/// ```
/// use u_probspace::stats::kahan_sum;
/// let atoms = [0.1; 10];
/// assert!((kahan_sum(&atoms) - 1.0).abs() < 1e-15);
/// ```
pub fn kahan_sum(data: &[f64]) -> f64 {
    compensated(data.iter().copied())
}

/// Compensated `Σ xᵢ·yᵢ` over the shorter of the two slices.
///
/// # Examples
/// ```
/// use u_probspace::stats::weighted_sum;
/// let values = [1.0, 2.0, 3.0];
/// let probs = [0.2, 0.3, 0.5];
/// assert!((weighted_sum(&values, &probs) - 2.3).abs() < 1e-12);
/// ```
pub fn weighted_sum(values: &[f64], weights: &[f64]) -> f64 {
    compensated(values.iter().zip(weights).map(|(v, w)| v * w))
}

fn compensated(terms: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for x in terms {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

// ---------------------------------------------------------------------------
// Welford online accumulator
// ---------------------------------------------------------------------------

/// Streaming mean and variance in O(1) memory.
///
/// Used by the experiment harness and the law-of-large-numbers simulator,
/// which observe samples one at a time.
///
/// # Examples
/// ```
/// use u_probspace::stats::RunningMoments;
/// let mut acc = RunningMoments::new();
/// for &x in &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.update(x);
/// }
/// assert!((acc.mean().unwrap() - 5.0).abs() < 1e-15);
/// assert!((acc.sample_variance().unwrap() - 4.571428571428571).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunningMoments {
    count: u64,
    mean_acc: f64,
    m2: f64,
}

impl RunningMoments {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one sample.
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        if self.count == 1 {
            // Avoids delta² overflow for huge first samples.
            self.mean_acc = value;
            return;
        }
        let delta = value - self.mean_acc;
        self.mean_acc += delta / self.count as f64;
        self.m2 += delta * (value - self.mean_acc);
    }

    /// Number of samples seen.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean, or `None` before the first sample.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean_acc)
    }

    /// Sample variance (n − 1), or `None` with fewer than 2 samples.
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count >= 2).then(|| self.m2 / (self.count - 1) as f64)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kahan_sum_small_atoms() {
        let atoms = vec![1e-3; 1000];
        assert!((kahan_sum(&atoms) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_kahan_sum_empty() {
        assert_eq!(kahan_sum(&[]), 0.0);
    }

    #[test]
    fn test_weighted_sum_truncates_to_shorter() {
        assert_eq!(weighted_sum(&[1.0, 2.0, 3.0], &[1.0, 1.0]), 3.0);
    }

    #[test]
    fn test_running_moments_empty() {
        let acc = RunningMoments::new();
        assert_eq!(acc.count(), 0);
        assert_eq!(acc.mean(), None);
        assert_eq!(acc.sample_variance(), None);
    }

    #[test]
    fn test_running_moments_single() {
        let mut acc = RunningMoments::new();
        acc.update(3.0);
        assert_eq!(acc.mean(), Some(3.0));
        assert_eq!(acc.sample_variance(), None);
    }

    #[test]
    fn test_running_moments_large_offset() {
        let mut acc = RunningMoments::new();
        (1..=5).for_each(|i| acc.update(1e9 + i as f64));
        let var = acc.sample_variance().unwrap();
        assert!((var - 2.5).abs() < 1e-5, "got {var}");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn running_moments_match_two_pass(data in proptest::collection::vec(-1e6_f64..1e6, 2..100)) {
            let mut acc = RunningMoments::new();
            data.iter().for_each(|&x| acc.update(x));
            let n = data.len() as f64;
            let mean = kahan_sum(&data) / n;
            let squares: Vec<f64> = data.iter().map(|x| (x - mean) * (x - mean)).collect();
            let var = kahan_sum(&squares) / (n - 1.0);
            prop_assert!((acc.mean().unwrap() - mean).abs() < 1e-6);
            let got = acc.sample_variance().unwrap();
            prop_assert!(got >= 0.0);
            prop_assert!((got - var).abs() < 1e-6 * var.max(1.0));
        }
    }
}
