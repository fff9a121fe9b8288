//! Evolution module - steady-state genetic optimization of model parameters.
//!
//! The loop is configured with pluggable genome operations and treats
//! fitness as an opaque, possibly stochastic oracle. The snowdrift
//! optimizer plugs in automaton rollouts as that oracle.

mod genome;
mod search;
mod snowdrift;

pub use genome::{GenomeOps, GenomeRng, Individual};
pub use search::{EvolutionEngine, Generations};
pub use snowdrift::SnowdriftOptimizer;
