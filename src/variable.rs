//! Discrete random variables on a finite probability space.

use crate::error::{Result, SpaceError};
use crate::event::Event;
use crate::measure::ProbabilityMeasure;
use crate::outcome::{OutcomeId, OutcomeSpace};
use crate::sigma::SigmaAlgebra;
use crate::stats::weighted_sum;

/// Real-valued function on outcomes, paired with a measure.
///
/// The value table must cover every outcome of the universe; the
/// constructor rejects shorter tables so that [`expected_value`] never
/// reads past the end.
///
/// [`expected_value`]: Self::expected_value
///
/// # Examples
/// ```
/// use u_probspace::{DiscreteRandomVariable, OutcomeSpace, ProbabilityMeasure};
///
/// let omega = OutcomeSpace::with_outcomes(["1", "2", "3"]);
/// let p = ProbabilityMeasure::from_atoms(&omega, vec![0.2, 0.3, 0.5]).unwrap();
/// let x = DiscreteRandomVariable::new(&omega, &p, vec![1.0, 2.0, 3.0]).unwrap();
/// assert!((x.expected_value() - 2.3).abs() < 1e-9);
/// assert_eq!(x.value(3), None);
/// ```
#[derive(Debug, Clone)]
pub struct DiscreteRandomVariable<'a> {
    omega: &'a OutcomeSpace,
    measure: &'a ProbabilityMeasure<'a>,
    values: Vec<f64>,
}

impl<'a> DiscreteRandomVariable<'a> {
    /// Creates a random variable from one value per outcome.
    ///
    /// Extra values past the universe are kept but never weighted.
    ///
    /// # Errors
    /// [`SpaceError::SizeMismatch`] if `values` is shorter than the
    /// universe, or if `measure` was built over a universe of another size.
    pub fn new(
        omega: &'a OutcomeSpace,
        measure: &'a ProbabilityMeasure<'a>,
        values: Vec<f64>,
    ) -> Result<Self> {
        if values.len() < omega.len() {
            return Err(SpaceError::SizeMismatch {
                expected: omega.len(),
                actual: values.len(),
            });
        }
        if measure.atoms().len() != omega.len() {
            return Err(SpaceError::SizeMismatch {
                expected: omega.len(),
                actual: measure.atoms().len(),
            });
        }
        Ok(Self {
            omega,
            measure,
            values,
        })
    }

    /// The indicator `1_A`, whose expectation is `P(A)`.
    pub fn indicator(
        omega: &'a OutcomeSpace,
        measure: &'a ProbabilityMeasure<'a>,
        event: &Event,
    ) -> Result<Self> {
        if event.len() != omega.len() {
            return Err(SpaceError::SizeMismatch {
                expected: omega.len(),
                actual: event.len(),
            });
        }
        let values = omega
            .ids()
            .map(|id| if event.contains(id) { 1.0 } else { 0.0 })
            .collect();
        Self::new(omega, measure, values)
    }

    /// `X(id)`, or `None` past the value table.
    pub fn value(&self, id: OutcomeId) -> Option<f64> {
        self.values.get(id).copied()
    }

    /// The value table.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The universe the variable is defined on.
    pub fn outcome_space(&self) -> &'a OutcomeSpace {
        self.omega
    }

    /// The measure used for expectation.
    pub fn measure(&self) -> &'a ProbabilityMeasure<'a> {
        self.measure
    }

    /// `E[X] = Σ X(ω)·P({ω})` over the universe.
    ///
    /// Only meaningful under a valid measure; see
    /// [`ProbabilityMeasure::is_valid`].
    pub fn expected_value(&self) -> f64 {
        let n = self.omega.len();
        weighted_sum(&self.values[..n], self.measure.atoms())
    }

    /// `Var[X] = E[X²] − E[X]²`.
    pub fn variance(&self) -> f64 {
        let n = self.omega.len();
        let squares: Vec<f64> = self.values[..n].iter().map(|v| v * v).collect();
        let mean = self.expected_value();
        weighted_sum(&squares, self.measure.atoms()) - mean * mean
    }

    /// The level set `{ω : X(ω) = value}`.
    ///
    /// NaN counts as one value, so `preimage(f64::NAN)` collects every
    /// outcome mapped to NaN.
    pub fn preimage(&self, value: f64) -> Event {
        let mask: Vec<bool> = self
            .omega
            .ids()
            .map(|id| same_value(self.values[id], value))
            .collect();
        Event::from_mask(mask)
    }

    /// Distinct values in first-seen order.
    pub(crate) fn distinct_values(&self) -> Vec<f64> {
        let mut seen: Vec<f64> = Vec::new();
        for &v in &self.values[..self.omega.len()] {
            if !seen.iter().any(|&s| same_value(s, v)) {
                seen.push(v);
            }
        }
        seen
    }

    /// Level sets of every distinct value; together they partition the
    /// universe.
    pub fn level_sets(&self) -> Vec<Event> {
        self.distinct_values()
            .into_iter()
            .map(|v| self.preimage(v))
            .collect()
    }

    /// `true` iff every level set belongs to `algebra`.
    ///
    /// This is measurability for a finite space: `{X ∈ B}` is a finite
    /// union of level sets, so it lies in any union-closed algebra that
    /// holds the level sets.
    pub fn is_measurable(&self, algebra: &SigmaAlgebra<'_>) -> bool {
        self.level_sets().iter().all(|e| algebra.contains(e))
    }
}

/// `==`, except that NaN equals NaN.
fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

// ============================================================================
// Tests
// ============================================================================
