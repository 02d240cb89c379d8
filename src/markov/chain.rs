use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use rand::Rng;
use tracing::debug;

use crate::random::weighted_choose;

/// First-order Markov chain estimated from transition counts.
///
/// States get dense indices in first-seen order. Each row keeps only the
/// transitions actually observed, ordered by target index so that sampling
/// with a seeded generator is reproducible.
///
/// # Examples
/// ```
/// use u_probspace::markov::MarkovChain;
///
/// let mut chain = MarkovChain::new();
/// chain.train(&["A", "B", "A", "B", "A"]);
/// assert_eq!(chain.transition_probability(&"A", &"B"), 1.0);
/// assert_eq!(chain.transition_probability(&"A", &"A"), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct MarkovChain<S> {
    index: HashMap<S, usize>,
    states: Vec<S>,
    rows: Vec<BTreeMap<usize, u64>>,
    row_totals: Vec<u64>,
}

impl<S> Default for MarkovChain<S> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            states: Vec::new(),
            rows: Vec::new(),
            row_totals: Vec::new(),
        }
    }
}

impl<S: Eq + Hash + Clone> MarkovChain<S> {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_state(&mut self, state: &S) -> usize {
        if let Some(&idx) = self.index.get(state) {
            return idx;
        }
        let idx = self.states.len();
        self.index.insert(state.clone(), idx);
        self.states.push(state.clone());
        self.rows.push(BTreeMap::new());
        self.row_totals.push(0);
        idx
    }

    /// Registers every state of `sequence` and counts each consecutive
    /// pair as one transition. Counts accumulate across calls.
    pub fn train(&mut self, sequence: &[S]) {
        let ids: Vec<usize> = sequence.iter().map(|s| self.ensure_state(s)).collect();
        for pair in ids.windows(2) {
            *self.rows[pair[0]].entry(pair[1]).or_insert(0) += 1;
            self.row_totals[pair[0]] += 1;
        }
        debug!(
            states = self.states.len(),
            transitions = ids.len().saturating_sub(1),
            "trained markov chain"
        );
    }

    /// Empirical distribution of the successor of `current`.
    ///
    /// Empty for unknown states and for states never followed by another.
    pub fn next_distribution(&self, current: &S) -> HashMap<S, f64> {
        let Some(idx) = self.observed_row(current) else {
            return HashMap::new();
        };
        let total = self.row_totals[idx] as f64;
        self.rows[idx]
            .iter()
            .map(|(&to, &count)| (self.states[to].clone(), count as f64 / total))
            .collect()
    }

    /// `P(to | from)`, `0.0` if either state is unknown or `from` has no
    /// observed successor.
    pub fn transition_probability(&self, from: &S, to: &S) -> f64 {
        let (Some(from_idx), Some(&to_idx)) = (self.observed_row(from), self.index.get(to)) else {
            return 0.0;
        };
        let count = self.rows[from_idx].get(&to_idx).copied().unwrap_or(0);
        count as f64 / self.row_totals[from_idx] as f64
    }

    /// Draws a successor of `current` weighted by transition counts.
    pub fn sample_next<R: Rng + ?Sized>(&self, current: &S, rng: &mut R) -> Option<S> {
        let idx = self.observed_row(current)?;
        let (targets, weights): (Vec<usize>, Vec<f64>) = self.rows[idx]
            .iter()
            .map(|(&to, &count)| (to, count as f64))
            .unzip();
        let pick = weighted_choose(&weights, rng)?;
        Some(self.states[targets[pick]].clone())
    }

    /// Walks the chain from `start` for up to `length` states, `start`
    /// included. Stops early at a state with no observed successor.
    pub fn generate<R: Rng + ?Sized>(&self, start: S, length: usize, rng: &mut R) -> Vec<S> {
        if length == 0 {
            return Vec::new();
        }
        // `length` is only an upper bound; the walk may stop at once.
        let mut walk = vec![start];
        while walk.len() < length {
            let Some(next) = walk.last().and_then(|s| self.sample_next(s, rng)) else {
                break;
            };
            walk.push(next);
        }
        walk
    }

    /// Known states in first-seen order.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains_state(&self, state: &S) -> bool {
        self.index.contains_key(state)
    }

    fn observed_row(&self, state: &S) -> Option<usize> {
        let &idx = self.index.get(state)?;
        (self.row_totals[idx] > 0).then_some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_alternating_sequence() {
        let mut chain = MarkovChain::new();
        chain.train(&["A", "B", "A", "B", "A"]);
        assert!((chain.transition_probability(&"A", &"B") - 1.0).abs() < 1e-9);
        assert!((chain.transition_probability(&"B", &"A") - 1.0).abs() < 1e-9);
        assert_eq!(chain.transition_probability(&"A", &"A"), 0.0);
        assert_eq!(chain.states(), &["A", "B"]);
    }

    #[test]
    fn test_incremental_training() {
        let mut chain = MarkovChain::new();
        chain.train(&["A", "B"]);
        assert!((chain.transition_probability(&"A", &"B") - 1.0).abs() < 1e-9);

        chain.train(&["A", "C"]);
        assert!((chain.transition_probability(&"A", &"B") - 0.5).abs() < 1e-9);
        assert!((chain.transition_probability(&"A", &"C") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_training_does_not_bridge_sequences() {
        let mut chain = MarkovChain::new();
        chain.train(&[1, 2]);
        chain.train(&[3]);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.transition_probability(&2, &3), 0.0);
        assert!(chain.next_distribution(&3).is_empty());
    }

    #[test]
    fn test_unknown_states() {
        let mut chain = MarkovChain::new();
        chain.train(&["x", "y"]);
        assert_eq!(chain.transition_probability(&"q", &"y"), 0.0);
        assert_eq!(chain.transition_probability(&"x", &"q"), 0.0);
        assert!(chain.next_distribution(&"q").is_empty());
        assert!(!chain.contains_state(&"q"));
        let mut rng = create_rng(0);
        assert_eq!(chain.sample_next(&"q", &mut rng), None);
    }

    #[test]
    fn test_next_distribution_sums_to_one() {
        let mut chain = MarkovChain::new();
        chain.train(&['a', 'b', 'a', 'c', 'a', 'c', 'a']);
        let dist = chain.next_distribution(&'a');
        assert_eq!(dist.len(), 2);
        assert!((dist[&'b'] - 1.0 / 3.0).abs() < 1e-12);
        assert!((dist[&'c'] - 2.0 / 3.0).abs() < 1e-12);
        assert!((dist.values().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_generate_stops_at_absorbing_state() {
        let mut chain = MarkovChain::new();
        chain.train(&["start", "middle", "end"]);
        let mut rng = create_rng(5);
        let walk = chain.generate("start", 10, &mut rng);
        assert_eq!(walk, vec!["start", "middle", "end"]);
        assert!(chain.generate("start", 0, &mut rng).is_empty());
        assert_eq!(chain.generate("start", 1, &mut rng), vec!["start"]);
    }

    #[test]
    fn test_generate_huge_length_from_absorbing_state() {
        let mut chain = MarkovChain::new();
        chain.train(&["a", "b"]);
        let mut rng = create_rng(5);
        assert_eq!(chain.generate("b", usize::MAX, &mut rng), vec!["b"]);
        assert_eq!(chain.generate("a", usize::MAX, &mut rng), vec!["a", "b"]);
    }

    #[test]
    fn test_generate_from_unknown_start() {
        let mut chain = MarkovChain::new();
        chain.train(&["a", "b"]);
        let mut rng = create_rng(5);
        assert_eq!(chain.generate("zzz", 4, &mut rng), vec!["zzz"]);
    }

    #[test]
    fn test_sampling_frequencies() {
        let mut chain = MarkovChain::new();
        chain.train(&[0, 1, 0, 2, 0, 2, 0, 2, 0]);
        let mut rng = create_rng(42);
        let mut twos = 0;
        let n = 10_000;
        for _ in 0..n {
            if chain.sample_next(&0, &mut rng) == Some(2) {
                twos += 1;
            }
        }
        let freq = twos as f64 / n as f64;
        assert!((freq - 0.75).abs() < 0.03, "freq {freq}");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn rows_are_distributions(seq in proptest::collection::vec(0_u8..6, 0..60)) {
            let mut chain = MarkovChain::new();
            chain.train(&seq);
            for s in chain.states() {
                let dist = chain.next_distribution(s);
                if !dist.is_empty() {
                    prop_assert!((dist.values().sum::<f64>() - 1.0).abs() < 1e-9);
                }
                for t in chain.states() {
                    let p = chain.transition_probability(s, t);
                    prop_assert!((0.0..=1.0).contains(&p));
                    prop_assert_eq!(p, dist.get(t).copied().unwrap_or(0.0));
                }
            }
        }

        #[test]
        fn generated_walk_follows_observed_transitions(
            seq in proptest::collection::vec(0_u8..5, 1..40),
            len in 0_usize..30,
            seed in 0_u64..1000,
        ) {
            let mut chain = MarkovChain::new();
            chain.train(&seq);
            let mut rng = crate::random::create_rng(seed);
            let walk = chain.generate(seq[0], len, &mut rng);
            prop_assert!(walk.len() <= len);
            for pair in walk.windows(2) {
                prop_assert!(chain.transition_probability(&pair[0], &pair[1]) > 0.0);
            }
        }
    }
}
