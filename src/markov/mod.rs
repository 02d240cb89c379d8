//! First-order Markov chains over arbitrary states, and a text model
//! built on top of them.

mod chain;
mod text;

pub use chain::MarkovChain;
pub use text::{MarkovTextModel, TokenLevel};
