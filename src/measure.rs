//! Probability measures over a finite outcome space.
//!
//! A measure stores one atomic probability per outcome and derives event
//! probabilities by summing atoms. Validity (non-negative atoms summing to
//! one) is a query, not a construction guarantee: atoms are usually
//! assigned one at a time and the measure is transiently invalid until
//! the last one lands.

use crate::error::{Result, SpaceError};
use crate::event::Event;
use crate::outcome::{OutcomeId, OutcomeSpace};
use crate::stats::kahan_sum;

/// Default normalization tolerance for [`ProbabilityMeasure::is_valid`].
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Atomic probability measure on a borrowed [`OutcomeSpace`].
///
/// # Examples
/// ```
/// use u_probspace::{Event, OutcomeSpace, ProbabilityMeasure};
/// use u_probspace::measure::DEFAULT_EPSILON;
///
/// let omega = OutcomeSpace::with_outcomes(["1", "2", "3"]);
/// let mut p = ProbabilityMeasure::new(&omega);
/// p.set_atomic_probability(0, 0.2).unwrap();
/// p.set_atomic_probability(1, 0.3).unwrap();
/// p.set_atomic_probability(2, 0.5).unwrap();
/// assert!(p.is_valid(DEFAULT_EPSILON));
///
/// let a = Event::from_mask([true, false, true]);
/// assert!((p.probability(&a).unwrap() - 0.7).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct ProbabilityMeasure<'a> {
    omega: &'a OutcomeSpace,
    atoms: Vec<f64>,
}

impl<'a> ProbabilityMeasure<'a> {
    /// Creates a measure with every atom at zero.
    pub fn new(omega: &'a OutcomeSpace) -> Self {
        Self {
            omega,
            atoms: vec![0.0; omega.len()],
        }
    }

    /// Creates the uniform measure. An empty universe yields an empty
    /// (and invalid) measure.
    pub fn uniform(omega: &'a OutcomeSpace) -> Self {
        let n = omega.len();
        let p = if n == 0 { 0.0 } else { 1.0 / n as f64 };
        Self {
            omega,
            atoms: vec![p; n],
        }
    }

    /// Creates a measure from a full table of atoms.
    ///
    /// # Errors
    /// [`SpaceError::SizeMismatch`] if `atoms.len() != omega.len()`.
    pub fn from_atoms(omega: &'a OutcomeSpace, atoms: Vec<f64>) -> Result<Self> {
        if atoms.len() != omega.len() {
            return Err(SpaceError::SizeMismatch {
                expected: omega.len(),
                actual: atoms.len(),
            });
        }
        Ok(Self { omega, atoms })
    }

    /// The universe this measure is defined on.
    pub fn outcome_space(&self) -> &'a OutcomeSpace {
        self.omega
    }

    /// Sets `P({id}) = p`. Any value is accepted; see [`is_valid`](Self::is_valid).
    ///
    /// # Errors
    /// [`SpaceError::OutOfRange`] if `id` is not an outcome of the universe.
    pub fn set_atomic_probability(&mut self, id: OutcomeId, p: f64) -> Result<()> {
        let size = self.atoms.len();
        let atom = self
            .atoms
            .get_mut(id)
            .ok_or(SpaceError::OutOfRange { id, size })?;
        *atom = p;
        Ok(())
    }

    /// `P({id})`, or `0.0` for identities outside the universe.
    pub fn get_atomic_probability(&self, id: OutcomeId) -> f64 {
        self.atoms.get(id).copied().unwrap_or(0.0)
    }

    /// All atoms in identity order.
    pub fn atoms(&self) -> &[f64] {
        &self.atoms
    }

    /// Sum of all atoms.
    pub fn total_mass(&self) -> f64 {
        kahan_sum(&self.atoms)
    }

    /// `true` iff every atom is `>= 0` and the atoms sum to one within `eps`.
    ///
    /// NaN atoms make the measure invalid.
    pub fn is_valid(&self, eps: f64) -> bool {
        self.validate(eps).is_ok()
    }

    /// Like [`is_valid`](Self::is_valid) but reports which check failed.
    pub fn validate(&self, eps: f64) -> Result<()> {
        if let Some((id, p)) = self
            .atoms
            .iter()
            .enumerate()
            .find(|(_, p)| p.is_nan() || **p < 0.0)
        {
            return Err(SpaceError::InvalidMeasure(format!(
                "atom {id} has probability {p}"
            )));
        }
        let total = self.total_mass();
        if (total - 1.0).abs() < eps {
            Ok(())
        } else {
            Err(SpaceError::InvalidMeasure(format!(
                "atoms sum to {total}, expected 1 within {eps}"
            )))
        }
    }

    /// `P(event)`: the sum of atoms over the event's members.
    ///
    /// # Errors
    /// [`SpaceError::SizeMismatch`] if the event was built for a universe of
    /// a different size.
    pub fn probability(&self, event: &Event) -> Result<f64> {
        if event.len() != self.atoms.len() {
            return Err(SpaceError::SizeMismatch {
                expected: self.atoms.len(),
                actual: event.len(),
            });
        }
        let members: Vec<f64> = event.outcomes().map(|id| self.atoms[id]).collect();
        Ok(kahan_sum(&members))
    }

    /// `P(a | given) = P(a ∩ given) / P(given)`.
    ///
    /// Returns `Ok(None)` when `P(given)` is zero.
    pub fn conditional_probability(&self, a: &Event, given: &Event) -> Result<Option<f64>> {
        let joint = Event::intersect(a, given)?;
        let p_given = self.probability(given)?;
        if p_given == 0.0 {
            return Ok(None);
        }
        Ok(Some(self.probability(&joint)? / p_given))
    }
}

// ============================================================================
// Tests
// ============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Normalized random atoms together with two event masks.
    fn measure_and_masks() -> impl Strategy<Value = (Vec<f64>, Vec<bool>, Vec<bool>)> {
        (1_usize..40).prop_flat_map(|n| {
            (
                proptest::collection::vec(0.01_f64..10.0, n).prop_map(|w| {
                    let total: f64 = w.iter().sum();
                    w.into_iter().map(|x| x / total).collect::<Vec<_>>()
                }),
                proptest::collection::vec(any::<bool>(), n),
                proptest::collection::vec(any::<bool>(), n),
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn normalized_atoms_are_valid((atoms, _, _) in measure_and_masks()) {
            let omega = OutcomeSpace::with_outcomes((0..atoms.len()).map(|i| i.to_string()));
            let p = ProbabilityMeasure::from_atoms(&omega, atoms).unwrap();
            prop_assert!(p.is_valid(1e-9));
        }

        #[test]
        fn additivity_for_disjoint_events((atoms, a, b) in measure_and_masks()) {
            let omega = OutcomeSpace::with_outcomes((0..atoms.len()).map(|i| i.to_string()));
            let p = ProbabilityMeasure::from_atoms(&omega, atoms).unwrap();
            let a = Event::from_mask(&a);
            // Force disjointness: b ∖ a.
            let b = Event::difference(&Event::from_mask(&b), &a).unwrap();
            prop_assert!(a.is_disjoint(&b));
            let lhs = p.probability(&Event::unite(&a, &b).unwrap()).unwrap();
            let rhs = p.probability(&a).unwrap() + p.probability(&b).unwrap();
            prop_assert!((lhs - rhs).abs() < 1e-12, "P(a∪b)={} != P(a)+P(b)={}", lhs, rhs);
        }

        #[test]
        fn complement_rule((atoms, a, _) in measure_and_masks()) {
            let omega = OutcomeSpace::with_outcomes((0..atoms.len()).map(|i| i.to_string()));
            let p = ProbabilityMeasure::from_atoms(&omega, atoms).unwrap();
            let a = Event::from_mask(&a);
            let pa = p.probability(&a).unwrap();
            let pc = p.probability(&Event::complement(&a)).unwrap();
            prop_assert!((pa + pc - 1.0).abs() < 1e-9);
        }
    }
}
