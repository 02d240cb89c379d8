//! Finite outcome universe.
//!
//! Outcomes are appended in order and receive dense zero-based identities.
//! Names are labels only: two outcomes may share a name, and the identity
//! is what every other component keys on.

/// Stable zero-based identity of an outcome inside its [`OutcomeSpace`].
pub type OutcomeId = usize;

/// Ordered, append-only universe of named outcomes.
///
/// # Invariants
/// - Identities are exactly `0..len()`.
/// - The universe only grows. Dependents ([`ProbabilityMeasure`],
///   [`SigmaAlgebra`], [`DiscreteRandomVariable`]) borrow it, so it cannot
///   grow while any of them is alive.
///
/// [`ProbabilityMeasure`]: crate::ProbabilityMeasure
/// [`SigmaAlgebra`]: crate::SigmaAlgebra
/// [`DiscreteRandomVariable`]: crate::DiscreteRandomVariable
///
/// # Examples
/// ```
/// use u_probspace::OutcomeSpace;
///
/// let mut omega = OutcomeSpace::new();
/// let heads = omega.add_outcome("heads");
/// let tails = omega.add_outcome("tails");
/// assert_eq!((heads, tails), (0, 1));
/// assert_eq!(omega.len(), 2);
/// assert_eq!(omega.name(tails), Some("tails"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeSpace {
    names: Vec<String>,
}

impl OutcomeSpace {
    /// Creates an empty universe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a universe from names, assigning identities in iteration order.
    pub fn with_outcomes<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Appends an outcome and returns its identity.
    pub fn add_outcome(&mut self, name: impl Into<String>) -> OutcomeId {
        self.names.push(name.into());
        self.names.len() - 1
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the universe has no outcomes.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of outcome `id`, or `None` if out of range.
    pub fn name(&self, id: OutcomeId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// First outcome carrying `name`.
    pub fn find(&self, name: &str) -> Option<OutcomeId> {
        self.names.iter().position(|n| n == name)
    }

    /// All identities in order.
    pub fn ids(&self) -> std::ops::Range<OutcomeId> {
        0..self.names.len()
    }

    /// `(id, name)` pairs in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (OutcomeId, &str)> + '_ {
        self.names.iter().map(String::as_str).enumerate()
    }
}
