//! End-to-end scenarios across outcomes, measures, variables and closure.

use u_probspace::distributions::{Binomial, Distribution};
use u_probspace::experiment::DistributionExperiment;
use u_probspace::measure::DEFAULT_EPSILON;
use u_probspace::random::create_rng;
use u_probspace::{
    ClosureConfig, DiscreteRandomVariable, Event, OutcomeSpace, ProbabilityMeasure, SigmaAlgebra,
    SpaceError,
};

#[test]
fn three_outcome_measure_and_expectation() {
    let mut omega = OutcomeSpace::new();
    for name in ["1", "2", "3"] {
        omega.add_outcome(name);
    }

    let mut p = ProbabilityMeasure::new(&omega);
    for (id, atom) in [0.2, 0.3, 0.5].into_iter().enumerate() {
        p.set_atomic_probability(id, atom).unwrap();
    }
    assert!(p.is_valid(DEFAULT_EPSILON));

    let one_or_three = Event::from_outcomes(omega.len(), [0, 2]).unwrap();
    assert!((p.probability(&one_or_three).unwrap() - 0.7).abs() < 1e-9);

    let x = DiscreteRandomVariable::new(&omega, &p, vec![1.0, 2.0, 3.0]).unwrap();
    assert!((x.expected_value() - 2.3).abs() < 1e-9);
}

#[test]
fn two_outcome_closure() {
    let omega = OutcomeSpace::with_outcomes(["A", "B"]);
    let sa = SigmaAlgebra::generate(&omega, &[Event::from_mask([true, false])]).unwrap();
    assert_eq!(
        sa.events(),
        &[
            Event::empty(2),
            Event::from_mask([true, false]),
            Event::from_mask([false, true]),
            Event::full(2),
        ]
    );
    assert!(sa.is_sigma_algebra());
}

#[test]
fn overlapping_generators_give_power_set() {
    let omega = OutcomeSpace::with_outcomes(["a", "b", "c", "d"]);
    let gens = [
        Event::from_mask([true, true, false, false]),
        Event::from_mask([false, true, true, false]),
    ];
    let sa = SigmaAlgebra::generate(&omega, &gens).unwrap();
    assert_eq!(sa.len(), 16);
    assert_eq!(sa.atoms().len(), 4);
    assert!(SigmaAlgebra::new(&omega, sa.events().to_vec()).is_sigma_algebra());
}

#[test]
fn lone_event_is_not_an_algebra() {
    let omega = OutcomeSpace::with_outcomes(["a", "b"]);
    let only_a = Event::from_mask([true, false]);
    assert!(!SigmaAlgebra::new(&omega, vec![only_a]).is_sigma_algebra());
}

#[test]
fn measurability_follows_generated_algebra() {
    let omega = OutcomeSpace::with_outcomes(["hh", "ht", "th", "tt"]);
    let p = ProbabilityMeasure::uniform(&omega);
    let first_is_heads = DiscreteRandomVariable::new(&omega, &p, vec![1.0, 1.0, 0.0, 0.0]).unwrap();
    let heads_count = DiscreteRandomVariable::new(&omega, &p, vec![2.0, 1.0, 1.0, 0.0]).unwrap();

    let first_toss = SigmaAlgebra::generated_by(&first_is_heads).unwrap();
    assert_eq!(first_toss.len(), 4);
    assert!(first_is_heads.is_measurable(&first_toss));
    assert!(!heads_count.is_measurable(&first_toss));

    let count_algebra = SigmaAlgebra::generated_by(&heads_count).unwrap();
    assert_eq!(count_algebra.atoms().len(), 3);
    assert!((heads_count.expected_value() - 1.0).abs() < 1e-12);
}

#[test]
fn closure_guard_from_toml() {
    let omega = OutcomeSpace::with_outcomes((0..6).map(|i| format!("w{i}")));
    let config = ClosureConfig::from_toml("max_outcomes = 5\nmax_events = 64\n").unwrap();
    assert_eq!(
        SigmaAlgebra::generate_with(&omega, &[], &config).unwrap_err(),
        SpaceError::UniverseTooLarge {
            outcomes: 6,
            limit: 5
        }
    );
    assert!(SigmaAlgebra::generate_with(&omega, &[], &ClosureConfig::default()).is_ok());
}

#[test]
fn one_generator_over_a_hundred_outcomes() {
    let omega = OutcomeSpace::with_outcomes((0..100).map(|i| format!("w{i}")));
    let evens = Event::from_outcomes(100, (0..100).step_by(2)).unwrap();
    let sa = SigmaAlgebra::generate(&omega, &[evens.clone()]).unwrap();
    assert_eq!(sa.len(), 4);
    assert!(sa.contains(&evens));
    assert!(sa.contains(&!&evens));
    assert!(sa.is_sigma_algebra());
}

#[test]
fn binomial_pmf_matches_measure_on_outcomes() {
    // A measure whose atoms are the Binomial(4, 0.3) pmf over {0..4}.
    let dist = Binomial::new(4, 0.3).unwrap();
    let omega = OutcomeSpace::with_outcomes((0..=4).map(|k| k.to_string()));
    let atoms: Vec<f64> = (0_u32..=4).map(|k| dist.pdf(f64::from(k))).collect();
    let p = ProbabilityMeasure::from_atoms(&omega, atoms).unwrap();
    assert!(p.is_valid(1e-8));

    let x = DiscreteRandomVariable::new(&omega, &p, (0_u32..=4).map(f64::from).collect()).unwrap();
    assert!((x.expected_value() - dist.theoretical_mean()).abs() < 1e-8);
    assert!((x.variance() - dist.theoretical_variance()).abs() < 1e-8);

    let at_most_one = Event::from_outcomes(5, [0, 1]).unwrap();
    assert!((p.probability(&at_most_one).unwrap() - dist.cdf(1.0)).abs() < 1e-8);

    let stats = DistributionExperiment::new(dist, 20_000).run(&mut create_rng(17));
    assert!(stats.mean_error.unwrap() < 0.05);
}
