//! Running-mean paths for watching the law of large numbers.

use rand::RngCore;
use tracing::debug;

use crate::distributions::Distribution;
use crate::error::{Result, SpaceError};
use crate::stats::RunningMoments;

/// One checkpoint of a running-mean path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LlnEntry {
    /// Samples drawn so far.
    pub n: usize,
    pub sample_mean: f64,
    /// `|sample_mean − E[X]|`; `NaN` when the mean is undefined.
    pub abs_error: f64,
}

/// Checkpoints in increasing `n`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlnPath {
    pub entries: Vec<LlnEntry>,
}

impl LlnPath {
    /// The checkpoint with the most samples.
    pub fn last(&self) -> Option<&LlnEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tracks the running sample mean of one distribution.
///
/// # Examples
/// ```
/// use u_probspace::distributions::Bernoulli;
/// use u_probspace::lln::LawOfLargeNumbersSimulator;
/// use u_probspace::random::create_rng;
///
/// let sim = LawOfLargeNumbersSimulator::new(Bernoulli::new(0.5).unwrap());
/// let path = sim.simulate(&mut create_rng(1), 1000, 300).unwrap();
/// let ns: Vec<usize> = path.entries.iter().map(|e| e.n).collect();
/// assert_eq!(ns, vec![300, 600, 900, 1000]);
/// ```
#[derive(Debug, Clone)]
pub struct LawOfLargeNumbersSimulator<D> {
    dist: D,
}

impl<D: Distribution> LawOfLargeNumbersSimulator<D> {
    pub fn new(dist: D) -> Self {
        Self { dist }
    }

    pub fn distribution(&self) -> &D {
        &self.dist
    }

    /// Draws `max_n` samples, recording a checkpoint at every multiple of
    /// `step` and a final one at `max_n` if it is not a multiple.
    ///
    /// # Errors
    /// [`SpaceError::EmptyStep`] if `step == 0`.
    pub fn simulate<R: RngCore>(&self, rng: &mut R, max_n: usize, step: usize) -> Result<LlnPath> {
        if step == 0 {
            return Err(SpaceError::EmptyStep);
        }
        let expected = self.dist.theoretical_mean();
        let mut path = LlnPath {
            entries: Vec::with_capacity(max_n / step + 1),
        };
        let mut moments = RunningMoments::new();

        for n in 1..=max_n {
            moments.update(self.dist.sample(rng));
            if n % step == 0 || n == max_n {
                let sample_mean = moments.mean().unwrap_or(f64::NAN);
                path.entries.push(LlnEntry {
                    n,
                    sample_mean,
                    abs_error: (sample_mean - expected).abs(),
                });
            }
        }

        debug!(max_n, step, checkpoints = path.len(), "law of large numbers path");
        Ok(path)
    }
}
