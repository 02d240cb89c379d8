//! # u-probspace
//!
//! Finite discrete probability spaces for the U-Engine ecosystem.
//!
//! The core models an outcome universe, events as subsets of it, a
//! probability measure over atoms, random variables, and the sigma-algebra
//! generated by a set of events. Around that core sit the numeric
//! collaborators that consume it: named distributions, a Monte-Carlo
//! experiment harness, a law-of-large-numbers simulator and a Markov
//! chain text model.
//!
//! ## Modules
//!
//! - [`outcome`] — Outcome universe with dense, stable identities
//! - [`event`] — Bit-packed event masks and their set algebra
//! - [`measure`] — Atomic probability measures
//! - [`variable`] — Discrete random variables and expectation
//! - [`sigma`] — Sigma-algebra axiom checking and closure generation
//! - [`distributions`] — Named distributions with PDF/CDF/sampling
//! - [`experiment`] — Empirical moments and Kolmogorov distance
//! - [`lln`] — Law-of-large-numbers convergence paths
//! - [`markov`] — Markov chains and a token-level text model
//!
//! ## Design Philosophy
//!
//! - **Queries are total**: lookups past the universe return `false`, `0.0`
//!   or `None` instead of failing.
//! - **Misuse is explicit**: writes past the universe and mixing events of
//!   different universes return [`SpaceError`].
//! - **Frozen universes**: dependents borrow the [`OutcomeSpace`], so it
//!   cannot grow underneath them.
//! - **Property-based testing**: closure and measure invariants verified via
//!   proptest

pub mod collections;
pub mod config;
pub mod distributions;
pub mod error;
pub mod event;
pub mod experiment;
pub mod lln;
pub mod markov;
pub mod measure;
pub mod outcome;
pub mod random;
pub mod sigma;
pub mod special;
pub mod stats;
pub mod variable;

pub use config::ClosureConfig;
pub use error::{Result, SpaceError};
pub use event::Event;
pub use measure::ProbabilityMeasure;
pub use outcome::{OutcomeId, OutcomeSpace};
pub use sigma::SigmaAlgebra;
pub use variable::DiscreteRandomVariable;
