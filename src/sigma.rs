//! Sigma-algebras over a finite outcome space.
//!
//! Two dual operations live here:
//!
//! - [`SigmaAlgebra::is_sigma_algebra`] checks a stored collection against
//!   the axioms directly.
//! - [`SigmaAlgebra::generate`] builds the smallest sigma-algebra holding a
//!   set of generator events as a monotone fixed point.
//!
//! On a finite universe countable unions reduce to finite ones, so both
//! work with complement and pairwise union only. Intersection closure
//! follows from De Morgan (`A ∩ B = (Aᶜ ∪ Bᶜ)ᶜ`) and is not checked
//! separately.
//!
//! # Complexity
//!
//! A closure over `n` outcomes can hold up to `2^n` events. Verification
//! of `k` events costs O(k²·n/64) with hash lookups on packed masks. The
//! generator only pairs each new event with the events found before it
//! (semi-naive iteration), so every unordered pair is united exactly once
//! over the whole run. [`ClosureConfig`] bounds both the universe and the
//! number of events held.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace, warn};

use crate::collections::UnionFind;
use crate::config::ClosureConfig;
use crate::error::{Result, SpaceError};
use crate::event::Event;
use crate::outcome::OutcomeSpace;
use crate::variable::DiscreteRandomVariable;

/// A collection of events on a borrowed [`OutcomeSpace`].
///
/// Holding a collection does not make it a sigma-algebra: validity is the
/// [`is_sigma_algebra`](Self::is_sigma_algebra) query. Collections built by
/// [`generate`](Self::generate) are always valid and free of duplicates.
///
/// # Examples
/// ```
/// use u_probspace::{Event, OutcomeSpace, SigmaAlgebra};
///
/// let omega = OutcomeSpace::with_outcomes(["A", "B"]);
/// let sa = SigmaAlgebra::generate(&omega, &[Event::from_mask([true, false])]).unwrap();
/// assert_eq!(sa.len(), 4);
/// assert!(sa.is_sigma_algebra());
///
/// let partial = SigmaAlgebra::new(&omega, vec![Event::from_mask([true, false])]);
/// assert!(!partial.is_sigma_algebra());
/// ```
#[derive(Debug, Clone)]
pub struct SigmaAlgebra<'a> {
    omega: &'a OutcomeSpace,
    events: Vec<Event>,
}

impl<'a> SigmaAlgebra<'a> {
    /// Wraps an arbitrary collection. Order and duplicates are preserved.
    pub fn new(omega: &'a OutcomeSpace, events: Vec<Event>) -> Self {
        Self { omega, events }
    }

    /// The universe.
    pub fn outcome_space(&self) -> &'a OutcomeSpace {
        self.omega
    }

    /// Stored events in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consumes the collection, returning its events.
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Number of stored events, duplicates included.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// `true` if no events are stored.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// `true` if an event with the same mask is stored.
    pub fn contains(&self, event: &Event) -> bool {
        self.events.iter().any(|e| e == event)
    }

    /// Checks the axioms against the stored collection.
    ///
    /// 1. Duplicates collapse into a set of distinct masks.
    /// 2. The empty and the full event must be present.
    /// 3. Every complement must be present.
    /// 4. Every pairwise union, `A ∪ A` included, must be present.
    ///
    /// Events built for a universe of a different size make the collection
    /// invalid. Never fails: an invalid collection is just `false`.
    pub fn is_sigma_algebra(&self) -> bool {
        let n = self.omega.len();
        if let Some(e) = self.events.iter().find(|e| e.len() != n) {
            debug!(expected = n, actual = e.len(), "event built for another universe");
            return false;
        }

        let set: HashSet<&Event> = self.events.iter().collect();
        if !set.contains(&Event::empty(n)) {
            debug!("empty event missing");
            return false;
        }
        if !set.contains(&Event::full(n)) {
            debug!("full event missing");
            return false;
        }

        let distinct: Vec<&Event> = set.iter().copied().collect();
        for (i, &a) in distinct.iter().enumerate() {
            if !set.contains(&Event::complement(a)) {
                debug!(event = %a, "complement missing");
                return false;
            }
            // Union is commutative, so unordered pairs cover all ordered ones.
            for &b in &distinct[i..] {
                if !Event::unite(a, b).is_ok_and(|u| set.contains(&u)) {
                    debug!(left = %a, right = %b, "union missing");
                    return false;
                }
            }
        }
        true
    }

    /// Smallest sigma-algebra containing `generators`, under the default
    /// [`ClosureConfig`].
    ///
    /// # Errors
    /// See [`generate_with`](Self::generate_with).
    pub fn generate(omega: &'a OutcomeSpace, generators: &[Event]) -> Result<Self> {
        Self::generate_with(omega, generators, &ClosureConfig::default())
    }

    /// Smallest sigma-algebra containing `generators`.
    ///
    /// Seeds a set with `∅`, `Ω` and the generators, then repeatedly adds
    /// complements and pairwise unions until a pass adds nothing. The set
    /// only grows inside a finite lattice, so the loop terminates. Events
    /// are returned sorted, without duplicates.
    ///
    /// # Errors
    /// - [`SpaceError::InvalidConfig`] if `config` does not validate.
    /// - [`SpaceError::UniverseTooLarge`] if `config.max_outcomes` is set
    ///   and the universe exceeds it.
    /// - [`SpaceError::SizeMismatch`] if a generator was built for another
    ///   universe.
    /// - [`SpaceError::ClosureTooLarge`] if the closure grows past
    ///   `config.max_events`.
    pub fn generate_with(
        omega: &'a OutcomeSpace,
        generators: &[Event],
        config: &ClosureConfig,
    ) -> Result<Self> {
        config.validate()?;
        let n = omega.len();
        if let Some(limit) = config.max_outcomes.filter(|&limit| n > limit) {
            warn!(outcomes = n, limit, "refusing closure over a large universe");
            return Err(SpaceError::UniverseTooLarge { outcomes: n, limit });
        }
        if let Some(g) = generators.iter().find(|g| g.len() != n) {
            return Err(SpaceError::SizeMismatch {
                expected: n,
                actual: g.len(),
            });
        }

        let mut known: HashSet<Event> = HashSet::new();
        let mut order: Vec<Event> = Vec::new();
        let seeds = [Event::empty(n), Event::full(n)];
        for e in seeds.iter().chain(generators) {
            if known.insert(e.clone()) {
                order.push(e.clone());
            }
        }
        check_budget(known.len(), config)?;

        // Everything in order[..settled] has been paired with everything
        // before it and complemented.
        let mut settled = 0;
        let mut pass = 0usize;
        while settled < order.len() {
            pass += 1;
            let frontier = order.len();
            let mut fresh = Vec::new();
            for j in settled..frontier {
                let comp = Event::complement(&order[j]);
                if known.insert(comp.clone()) {
                    fresh.push(comp);
                }
                for i in 0..=j {
                    let union = Event::unite(&order[i], &order[j])?;
                    if !known.contains(&union) {
                        known.insert(union.clone());
                        fresh.push(union);
                    }
                }
                check_budget(known.len(), config)?;
            }
            trace!(pass, events = known.len(), added = fresh.len(), "closure pass");
            settled = frontier;
            order.extend(fresh);
        }

        order.sort();
        debug!(outcomes = n, events = order.len(), passes = pass, "closure complete");
        Ok(Self::new(omega, order))
    }

    /// Sigma-algebra generated by the level sets of `variable`, i.e. the
    /// smallest one making it measurable.
    pub fn generated_by(variable: &DiscreteRandomVariable<'a>) -> Result<Self> {
        Self::generate(variable.outcome_space(), &variable.level_sets())
    }

    /// Partition of the universe into blocks of outcomes that no stored
    /// event separates, ordered by smallest member.
    ///
    /// For a valid sigma-algebra these blocks are its atoms and the algebra
    /// has exactly `2^atoms().len()` events. Events built for another
    /// universe are ignored.
    pub fn atoms(&self) -> Vec<Event> {
        let n = self.omega.len();
        let events: Vec<&Event> = self.events.iter().filter(|e| e.len() == n).collect();

        let mut uf = UnionFind::new(n);
        for a in 0..n {
            for b in (a + 1)..n {
                if events.iter().all(|e| e.contains(a) == e.contains(b)) {
                    uf.union(a, b);
                }
            }
        }

        let mut blocks: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for id in 0..n {
            let root = uf.find(id);
            blocks
                .entry(root)
                .or_insert_with(|| {
                    roots.push(root);
                    Vec::new()
                })
                .push(id);
        }
        roots
            .into_iter()
            .filter_map(|root| blocks.remove(&root))
            .filter_map(|members| Event::from_outcomes(n, members).ok())
            .collect()
    }
}

fn check_budget(events: usize, config: &ClosureConfig) -> Result<()> {
    if events > config.max_events {
        warn!(events, limit = config.max_events, "closure exceeded event budget");
        return Err(SpaceError::ClosureTooLarge {
            events,
            limit: config.max_events,
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
