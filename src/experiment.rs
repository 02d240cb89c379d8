//! Monte Carlo checks of a distribution against its theoretical moments
//! and CDF.

use rand::RngCore;
use tracing::debug;

use crate::distributions::Distribution;
use crate::error::{Result, SpaceError};
use crate::stats::RunningMoments;

/// Empirical moments of one experiment run and their distance to the
/// theoretical moments.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentStats {
    /// Sample mean, `NaN` for an empty sample.
    pub empirical_mean: f64,
    /// Sample variance with denominator `n − 1`, `NaN` below two samples.
    pub empirical_variance: f64,
    /// `|empirical − theoretical|` mean, `None` if either side is undefined.
    pub mean_error: Option<f64>,
    /// `|empirical − theoretical|` variance, `None` if either side is
    /// undefined.
    pub variance_error: Option<f64>,
}

/// Draws fixed-size samples from a distribution.
///
/// # Examples
/// ```
/// use u_probspace::distributions::Uniform;
/// use u_probspace::experiment::DistributionExperiment;
/// use u_probspace::random::create_rng;
///
/// let exp = DistributionExperiment::new(Uniform::new(0.0, 1.0).unwrap(), 20_000);
/// let stats = exp.run(&mut create_rng(7));
/// assert!(stats.mean_error.unwrap() < 0.02);
/// ```
#[derive(Debug, Clone)]
pub struct DistributionExperiment<D> {
    dist: D,
    sample_size: usize,
}

impl<D: Distribution> DistributionExperiment<D> {
    pub fn new(dist: D, sample_size: usize) -> Self {
        Self { dist, sample_size }
    }

    pub fn distribution(&self) -> &D {
        &self.dist
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Draws `sample_size` values and compares their moments with the
    /// distribution's.
    pub fn run<R: RngCore>(&self, rng: &mut R) -> ExperimentStats {
        let mut moments = RunningMoments::new();
        for _ in 0..self.sample_size {
            moments.update(self.dist.sample(rng));
        }

        let empirical_mean = moments.mean().unwrap_or(f64::NAN);
        let empirical_variance = moments.sample_variance().unwrap_or(f64::NAN);
        let stats = ExperimentStats {
            empirical_mean,
            empirical_variance,
            mean_error: abs_error(empirical_mean, self.dist.theoretical_mean()),
            variance_error: abs_error(empirical_variance, self.dist.theoretical_variance()),
        };
        debug!(
            samples = self.sample_size,
            mean = stats.empirical_mean,
            variance = stats.empirical_variance,
            "experiment finished"
        );
        stats
    }

    /// Empirical CDF of a fresh sample of `sample_size` values, evaluated
    /// at every grid point as the fraction of samples `≤ x`.
    ///
    /// An empty sample yields `0.0` everywhere.
    pub fn empirical_cdf<R: RngCore>(
        &self,
        grid: &[f64],
        rng: &mut R,
        sample_size: usize,
    ) -> Vec<f64> {
        if sample_size == 0 {
            return vec![0.0; grid.len()];
        }
        let mut samples: Vec<f64> = (0..sample_size).map(|_| self.dist.sample(rng)).collect();
        samples.sort_by(f64::total_cmp);

        let n = sample_size as f64;
        grid.iter()
            .map(|&x| samples.partition_point(|&s| s <= x) as f64 / n)
            .collect()
    }

    /// `max |ECDF(x) − F(x)|` over the grid.
    ///
    /// # Errors
    /// [`SpaceError::SizeMismatch`] if `ecdf` and `grid` differ in length.
    pub fn kolmogorov_distance(&self, grid: &[f64], ecdf: &[f64]) -> Result<f64> {
        if grid.len() != ecdf.len() {
            return Err(SpaceError::SizeMismatch {
                expected: grid.len(),
                actual: ecdf.len(),
            });
        }
        Ok(grid
            .iter()
            .zip(ecdf)
            .map(|(&x, &e)| (e - self.dist.cdf(x)).abs())
            .fold(0.0, f64::max))
    }
}

fn abs_error(empirical: f64, theoretical: f64) -> Option<f64> {
    if empirical.is_nan() || theoretical.is_nan() {
        None
    } else {
        Some((empirical - theoretical).abs())
    }
}
